//! Word-window chunking

/// Splits text into overlapping windows of whitespace-separated words.
///
/// Windows start every `step = max(chunk_size - overlap, 1)` words and hold up
/// to `chunk_size` words joined by single spaces. The final window may be short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordChunker {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl WordChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap).max(1)
    }

    /// Chunk `text`; whitespace-only input yields no chunks
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let step = self.step();

        (0..words.len())
            .step_by(step)
            .map(|start| {
                let end = (start + self.chunk_size).min(words.len());
                words[start..end].join(" ")
            })
            .filter(|chunk| !chunk.trim().is_empty())
            .collect()
    }
}

impl From<&sol_core::RagConfig> for WordChunker {
    fn from(config: &sol_core::RagConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_overlapping_windows() {
        let chunks = WordChunker::new(3, 1).chunk(FOX);
        assert_eq!(
            chunks,
            vec![
                "The quick brown",
                "brown fox jumps",
                "jumps over the",
                "the lazy dog",
                "dog",
            ]
        );
    }

    #[test]
    fn test_no_overlap() {
        let chunks = WordChunker::new(4, 0).chunk(FOX);
        assert_eq!(
            chunks,
            vec!["The quick brown fox", "jumps over the lazy", "dog"]
        );
    }

    #[test]
    fn test_overlap_not_smaller_than_size_steps_by_one() {
        let chunker = WordChunker::new(2, 5);
        assert_eq!(chunker.step(), 1);

        let chunks = chunker.chunk("a b c");
        assert_eq!(chunks, vec!["a b", "b c", "c"]);
    }

    #[test]
    fn test_whitespace_is_normalised() {
        let chunks = WordChunker::new(10, 2).chunk("  alpha\t\tbeta\n\ngamma  ");
        assert_eq!(chunks, vec!["alpha beta gamma"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let chunker = WordChunker::new(5, 1);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk(" \n\t \r\n").is_empty());
    }

    #[test]
    fn test_chunk_sizes_bounded_and_overlap_exact() {
        let text: String = (0..57).map(|i| format!("w{} ", i)).collect();
        let (size, overlap) = (8, 3);
        let chunks = WordChunker::new(size, overlap).chunk(&text);

        for chunk in &chunks {
            assert!(chunk.split(' ').count() <= size);
        }

        for pair in chunks.windows(2) {
            let current: Vec<&str> = pair[0].split(' ').collect();
            let next: Vec<&str> = pair[1].split(' ').collect();
            if current.len() < size {
                continue;
            }
            let tail = &current[current.len() - overlap..];
            let head = &next[..overlap.min(next.len())];
            assert_eq!(&tail[..head.len()], head);
        }
    }

    #[test]
    fn test_deterministic() {
        let chunker = WordChunker::new(5, 2);
        let text = "one two three four five six seven eight nine ten eleven";
        assert_eq!(chunker.chunk(text), chunker.chunk(text));
    }

    #[test]
    fn test_from_config() {
        let config = sol_core::RagConfig::default();
        let chunker = WordChunker::from(&config);
        assert_eq!(chunker, WordChunker::new(800, 100));
    }
}
