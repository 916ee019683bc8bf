use crate::domain::batch::Payment;
use crate::error::{MasspayError, Result};
use std::io::Read;

/// Reads payment recipients from a CSV source.
///
/// Expects `destination, amount` columns. Wraps `csv::Reader` and provides an
/// iterator over `Result<Payment>`, trimming whitespace and tolerating
/// flexible record lengths.
pub struct RecipientReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecipientReader<R> {
    /// Creates a new `RecipientReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes payments.
    pub fn payments(self) -> impl Iterator<Item = Result<Payment>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(MasspayError::from))
    }
}
