/// Conventional number of source blocks a message is split into.
pub const EZHIK_DEFAULT_NUM_SOURCE_BLOCKS: usize = 128;

/// Number of coded blocks a driver should gather on top of the number of source blocks before giving up.
/// Randomly drawn GF(2) coefficient vectors of length n are linearly independent with probability roughly
/// 0.289 for exactly n blocks, while every extra block halves the failure probability.
pub const EZHIK_RECOMMENDED_EXTRA_CODED_BLOCKS: usize = 16;
