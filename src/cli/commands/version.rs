use crate::cli::Output;
use anyhow::Result;

pub fn execute(output: &Output) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if output.is_quiet() {
        println!("{name} {version}");
        return Ok(());
    }

    output.header("bandreport version information");
    output.key_value("Version:", &format!("{name} v{version}"), true);
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);

    output.category("Build Information");
    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }, false);
    Ok(())
}
