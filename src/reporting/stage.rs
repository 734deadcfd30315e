use std::fmt;

/// Where a report run currently is
///
/// A run starts in `Validating` and moves forward through the non-terminal
/// stages in declaration order; `PostProcessing` is skipped when the template declares no post-processor.
/// `Completed`, `Cancelled` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStage {
    Validating,
    ResolvingParameters,
    ExtractingData,
    Rendering,
    PostProcessing,
    NamingOutput,
    Completed,
    Cancelled,
    Failed,
}

impl ExecutionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::ResolvingParameters => "resolving-parameters",
            Self::ExtractingData => "extracting-data",
            Self::Rendering => "rendering",
            Self::PostProcessing => "post-processing",
            Self::NamingOutput => "naming-output",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
