/// Byte frequency table for Huffman code generation
///
/// Iterates in first-occurrence order: the byte seen first in the input
/// comes first. Tree construction relies on this order to break ties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Occurrence count for each byte value (0 = absent)
    counts: [u64; 256],
    /// Distinct bytes in the order they first appeared
    order: Vec<u8>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; 256], order: Vec::new() }
    }

    /// Count byte occurrences in `bytes`
    pub fn analyze(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in bytes {
            table.record(byte);
        }
        table
    }

    fn record(&mut self, byte: u8) {
        let count = &mut self.counts[byte as usize];
        if *count == 0 {
            self.order.push(byte);
        }
        *count += 1;
    }

    /// Count for `byte`, or `None` if it never occurred
    pub fn get(&self, byte: u8) -> Option<u64> {
        match self.counts[byte as usize] {
            0 => None,
            count => Some(count),
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.counts[byte as usize] > 0
    }

    /// Number of distinct bytes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts (equals the input length)
    pub fn total(&self) -> u64 {
        self.order.iter().map(|&b| self.counts[b as usize]).sum()
    }

    /// `(byte, count)` pairs in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.order.iter().map(move |&b| (b, self.counts[b as usize]))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_counts() {
        let table = FrequencyTable::analyze(b"AABC");
        assert_eq!(table.get(b'A'), Some(2));
        assert_eq!(table.get(b'B'), Some(1));
        assert_eq!(table.get(b'C'), Some(1));
        assert_eq!(table.get(b'D'), None);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_first_occurrence_order() {
        let table = FrequencyTable::analyze(b"cabbac");
        let order: Vec<(u8, u64)> = table.iter().collect();
        assert_eq!(order, vec![(b'c', 2), (b'a', 2), (b'b', 2)]);
    }

    #[test]
    fn test_analyze_empty() {
        let table = FrequencyTable::analyze(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
        let table = FrequencyTable::analyze(&data);
        assert_eq!(table.len(), 256);
        assert_eq!(table.total(), 512);
        assert!((0..=255u8).all(|b| table.get(b) == Some(2)));
    }
}
