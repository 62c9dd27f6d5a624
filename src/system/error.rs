/// Reasons a single process could not be sampled.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The pid was enumerated but one of its records could not be read,
    /// usually because the process exited in between.
    #[error("process {pid} vanished before it could be sampled")]
    Vanished { pid: u32 },
}
