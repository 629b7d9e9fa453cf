#[derive(Debug, PartialEq)]
pub enum EzhikError {
    IndexOutOfRange(usize, usize),
    LengthMismatch(usize, usize),

    CoefficientDimensionMismatch(usize, usize),
    ValueDimensionMismatch(usize, usize),

    InvalidNumSourceBlocks(usize),
    InvalidBlockByteLen(usize),
    InvalidCodedBlockLength(usize, usize),
    NotYetReadyToDecode(usize, usize),
}

impl std::fmt::Display for EzhikError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EzhikError::IndexOutOfRange(index, len) => write!(f, "bit index {} out of range (len: {})", index, len),
            EzhikError::LengthMismatch(expected, actual) => write!(f, "bit vector length mismatch: expected {}, found {}", expected, actual),

            EzhikError::CoefficientDimensionMismatch(expected, actual) => {
                write!(f, "coefficient vector has {} bits, system has {} unknowns", actual, expected)
            }
            EzhikError::ValueDimensionMismatch(expected, actual) => write!(f, "value block has {} bits, expected {} bits", actual, expected),

            EzhikError::InvalidNumSourceBlocks(n) => write!(f, "invalid number of source blocks: {}", n),
            EzhikError::InvalidBlockByteLen(len) => write!(f, "invalid block byte length: {}", len),
            EzhikError::InvalidCodedBlockLength(expected, actual) => write!(f, "coded block is {}B, expected: {}B", actual, expected),
            EzhikError::NotYetReadyToDecode(rank, n) => write!(f, "not ready to decode: rank {} of {}", rank, n),
        }
    }
}

impl std::error::Error for EzhikError {}
