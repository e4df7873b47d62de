/// Last forwarded batch of partial candidates, kept only for deduplication.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartialResultBuffer {
    last: Vec<String>,
}

impl PartialResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last.clear();
    }

    pub fn contents(&self) -> &[String] {
        &self.last
    }

    /// Record `candidates` if they should be forwarded.
    ///
    /// Returns false for empty batches and for repeats of the current contents.
    pub fn offer(&mut self, candidates: &[String]) -> bool {
        if candidates.is_empty() || candidates == self.last.as_slice() {
            return false;
        }
        self.last = candidates.to_vec();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_repeat_is_suppressed() {
        let mut buffer = PartialResultBuffer::new();
        assert!(buffer.offer(&batch(&["hi"])));
        assert!(!buffer.offer(&batch(&["hi"])));
        assert_eq!(buffer.contents(), ["hi"]);
    }

    #[test]
    fn test_empty_is_suppressed() {
        let mut buffer = PartialResultBuffer::new();
        assert!(!buffer.offer(&[]));
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_each_change_is_forwarded() {
        let mut buffer = PartialResultBuffer::new();
        assert!(buffer.offer(&batch(&["hi"])));
        assert!(buffer.offer(&batch(&["hi the"])));
        assert!(buffer.offer(&batch(&["hi there", "high there"])));
        assert!(buffer.offer(&batch(&["high there", "hi there"])));
    }

    #[test]
    fn test_reset_allows_same_batch_again() {
        let mut buffer = PartialResultBuffer::new();
        assert!(buffer.offer(&batch(&["hi"])));
        buffer.reset();
        assert!(buffer.offer(&batch(&["hi"])));
    }
}
