use plate_export::ExportError;
use plate_ops::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Generation failed for a specific image.
    #[error("{path}: {source}")]
    Image {
        path: String,
        #[source]
        source: PipelineError,
    },

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("no value given for `{parameter}`")]
    MissingInput { parameter: &'static str },

    #[error("invalid value `{value}` for `{parameter}`: expected a number")]
    InvalidInput {
        parameter: &'static str,
        value: String,
    },

    #[error("failed to read input: {reason}")]
    Io { reason: String },
}
