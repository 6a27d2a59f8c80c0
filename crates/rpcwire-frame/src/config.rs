/// Default capacity reserved for a framer's accumulation buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default number of bytes pulled from a blocking reader per read call.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration shared by the framer and its I/O adapters.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Bytes reserved up front for the accumulation buffer. Default: 8 KiB.
    pub initial_buffer_capacity: usize,
    /// Size of each read issued by [`MessageReader`](crate::MessageReader). Default: 8 KiB.
    pub read_chunk_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
