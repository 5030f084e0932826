//! Huffman coding over 7-bit ASCII text
//!
//! Builds a prefix-free binary code for a message from its character
//! frequencies. Construction runs the classic greedy merge: every distinct
//! character starts as a single-leaf tree in a
//! [`MinHeap`](crate::arrayed_heap::MinHeap) keyed on frequency alone, and
//! the two lightest trees are repeatedly joined until one remains. Equal
//! frequencies tie, so their merge order (and thus the exact code words)
//! follows heap order; only the code lengths are canonical.
//!
//! Codes are returned and consumed as strings of '0' and '1', with '0'
//! marking the left branch. A message with a single distinct character gets
//! the one-bit code "0".
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::huffman::HuffmanCoder;
//!
//! let coder = HuffmanCoder::new("mississippi")?;
//! let bits = coder.encode();
//! assert_eq!(coder.decode(&bits)?, "mississippi");
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use crate::arrayed_heap::MinHeap;
use crate::traits::{Container, ContainerError};

/// Size of the coded alphabet: the 7-bit ASCII range
const ASCII_RANGE: usize = 128;

/// A node of the code tree
#[derive(Debug)]
enum HuffNode {
    Leaf(u8),
    Join(Box<HuffNode>, Box<HuffNode>),
}

/// A code tree under construction, weighted by total frequency
///
/// Ordering looks at the frequency only; the tree shape never participates,
/// so equally weighted trees compare as equal.
#[derive(Debug)]
struct WeightedTree {
    frequency: u32,
    node: HuffNode,
}

impl PartialEq for WeightedTree {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency
    }
}

impl Eq for WeightedTree {}

impl PartialOrd for WeightedTree {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedTree {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.frequency.cmp(&other.frequency)
    }
}

/// A Huffman code fitted to one message
#[derive(Debug)]
pub struct HuffmanCoder {
    message: String,
    tree: HuffNode,
    /// Code word per ASCII character; `None` for characters absent from
    /// the message
    codes: Vec<Option<String>>,
}

impl HuffmanCoder {
    /// Fits a code to `message`
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when the message is empty or
    /// contains a character outside 7-bit ASCII.
    pub fn new(message: &str) -> Result<Self, ContainerError> {
        if message.is_empty() {
            return Err(ContainerError::InvalidArgument("message must be non-empty"));
        }
        if !message.is_ascii() {
            return Err(ContainerError::InvalidArgument(
                "message must be 7-bit ASCII",
            ));
        }

        let mut frequency = [0u32; ASCII_RANGE];
        for b in message.bytes() {
            frequency[b as usize] += 1;
        }
        let distinct = frequency.iter().filter(|&&f| f > 0).count();

        // Merging always removes two trees and adds one, so the heap never
        // regrows past the distinct-character count.
        let mut forest = MinHeap::with_capacity(distinct);
        for (ch, &freq) in frequency.iter().enumerate() {
            if freq > 0 {
                forest.insert(WeightedTree {
                    frequency: freq,
                    node: HuffNode::Leaf(ch as u8),
                })?;
            }
        }
        while forest.len() > 1 {
            let lighter = forest.delete_at(1)?;
            let heavier = forest.delete_at(1)?;
            forest.insert(WeightedTree {
                frequency: lighter.frequency + heavier.frequency,
                node: HuffNode::Join(Box::new(lighter.node), Box::new(heavier.node)),
            })?;
        }
        let tree = forest.delete_at(1)?.node;

        let mut codes = vec![None; ASCII_RANGE];
        match &tree {
            // A one-character alphabet still needs a non-empty code word.
            HuffNode::Leaf(ch) => codes[*ch as usize] = Some("0".to_string()),
            join => Self::collect_codes(join, &mut String::new(), &mut codes),
        }

        Ok(Self {
            message: message.to_string(),
            tree,
            codes,
        })
    }

    /// The message the code was fitted to
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The code word for `ch`; `None` for characters not in the message
    pub fn code_for(&self, ch: char) -> Option<&str> {
        if !ch.is_ascii() {
            return None;
        }
        self.codes[ch as usize].as_deref()
    }

    /// Encodes the fitted message as a string of '0' and '1'
    pub fn encode(&self) -> String {
        let mut bits = String::new();
        for b in self.message.bytes() {
            let code = self.codes[b as usize]
                .as_deref()
                .expect("every message character received a code");
            bits.push_str(code);
        }
        bits
    }

    /// Decodes a string of '0' and '1' produced under this code
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when the input contains a
    /// character other than '0' or '1', takes a branch that does not
    /// exist, or ends partway through a code word.
    pub fn decode(&self, bits: &str) -> Result<String, ContainerError> {
        if let HuffNode::Leaf(ch) = &self.tree {
            let mut out = String::new();
            for bit in bits.chars() {
                if bit != '0' {
                    return Err(ContainerError::InvalidArgument(
                        "encoded text contains an invalid bit",
                    ));
                }
                out.push(*ch as char);
            }
            return Ok(out);
        }

        let mut out = String::new();
        let mut node = &self.tree;
        let mut depth = 0;
        for bit in bits.chars() {
            let next = match (bit, node) {
                ('0', HuffNode::Join(left, _)) => left,
                ('1', HuffNode::Join(_, right)) => right,
                _ => {
                    return Err(ContainerError::InvalidArgument(
                        "encoded text contains an invalid bit",
                    ))
                }
            };
            depth += 1;
            match next.as_ref() {
                HuffNode::Leaf(ch) => {
                    out.push(*ch as char);
                    node = &self.tree;
                    depth = 0;
                }
                join => node = join,
            }
        }
        if depth != 0 {
            return Err(ContainerError::InvalidArgument(
                "encoded text ends partway through a code word",
            ));
        }
        Ok(out)
    }

    /// Records the code word of every leaf below `node`
    fn collect_codes(node: &HuffNode, path: &mut String, codes: &mut [Option<String>]) {
        match node {
            HuffNode::Leaf(ch) => codes[*ch as usize] = Some(path.clone()),
            HuffNode::Join(left, right) => {
                path.push('0');
                Self::collect_codes(left, path, codes);
                path.pop();
                path.push('1');
                Self::collect_codes(right, path, codes);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let coder = HuffmanCoder::new("mississippi").unwrap();
        let bits = coder.encode();
        assert!(bits.chars().all(|c| c == '0' || c == '1'));
        assert_eq!(coder.decode(&bits).unwrap(), "mississippi");
        assert_eq!(coder.message(), "mississippi");
    }

    #[test]
    fn test_frequent_characters_get_short_codes() {
        let coder = HuffmanCoder::new("mississippi").unwrap();
        let len = |ch| coder.code_for(ch).unwrap().len();
        // i and s appear four times each, p twice, m once.
        assert!(len('i') <= len('p'));
        assert!(len('s') <= len('p'));
        assert!(len('p') <= len('m'));
        assert_eq!(coder.code_for('z'), None);
        assert_eq!(coder.code_for('é'), None);
    }

    #[test]
    fn test_two_character_alphabet_uses_one_bit_each() {
        let coder = HuffmanCoder::new("aab").unwrap();
        assert_eq!(coder.code_for('a').unwrap().len(), 1);
        assert_eq!(coder.code_for('b').unwrap().len(), 1);
        assert_eq!(coder.encode().len(), 3);
        assert_eq!(coder.decode(&coder.encode()).unwrap(), "aab");
    }

    #[test]
    fn test_single_character_alphabet() {
        let coder = HuffmanCoder::new("aaaa").unwrap();
        assert_eq!(coder.code_for('a'), Some("0"));
        assert_eq!(coder.encode(), "0000");
        assert_eq!(coder.decode("00").unwrap(), "aa");
        assert!(matches!(
            coder.decode("01"),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_non_ascii() {
        assert!(matches!(
            HuffmanCoder::new(""),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            HuffmanCoder::new("héllo"),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let coder = HuffmanCoder::new("abcd").unwrap();
        // Four equally frequent characters code to two bits each, so a
        // lone bit ends mid-word.
        assert!(matches!(
            coder.decode("0"),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            coder.decode("02"),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert_eq!(coder.decode("").unwrap(), "");
    }

    #[test]
    fn test_longer_text_round_trip() {
        let text = "the quick brown fox jumps over the lazy dog";
        let coder = HuffmanCoder::new(text).unwrap();
        let bits = coder.encode();
        assert_eq!(coder.decode(&bits).unwrap(), text);
        // A fitted code never does worse than 7 bits per character.
        assert!(bits.len() <= text.len() * 7);
    }
}
