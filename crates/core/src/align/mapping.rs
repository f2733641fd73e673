//! Piece/word index mappings

use crate::align::span::{PieceSpan, WordSpan};
use crate::traits::tokenizer::PieceTokenizer;

/// Bidirectional mapping between sub-word pieces and words
///
/// Every token that is not a continuation starts a new word. The first
/// token always starts word zero, so word indices are zero-based and
/// contiguous and the word spans partition the token sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceWordMap {
    piece_to_word: Vec<usize>,
    word_to_piece: Vec<PieceSpan>,
}

impl PieceWordMap {
    /// Build the mapping for a token sequence
    pub fn build<T: PieceTokenizer + ?Sized>(tokens: &[String], tokenizer: &T) -> Self {
        Self::from_word_starts(tokens.iter().map(|token| !tokenizer.is_piece(token)))
    }

    /// Build the mapping from per-token word-start flags
    pub fn from_word_starts(word_starts: impl IntoIterator<Item = bool>) -> Self {
        let mut piece_to_word = Vec::new();
        let mut word_to_piece: Vec<PieceSpan> = Vec::new();

        for (piece, starts_word) in word_starts.into_iter().enumerate() {
            match word_to_piece.last_mut() {
                Some(current) if !starts_word => current.end = piece,
                _ => word_to_piece.push(PieceSpan::new(piece, piece)),
            }
            piece_to_word.push(word_to_piece.len() - 1);
        }

        Self {
            piece_to_word,
            word_to_piece,
        }
    }

    /// Word index for every piece
    pub fn piece_to_word(&self) -> &[usize] {
        &self.piece_to_word
    }

    /// Piece range for every word
    pub fn word_to_piece(&self) -> &[PieceSpan] {
        &self.word_to_piece
    }

    /// Number of pieces
    pub fn num_pieces(&self) -> usize {
        self.piece_to_word.len()
    }

    /// Number of words
    pub fn num_words(&self) -> usize {
        self.word_to_piece.len()
    }

    /// Word containing a piece
    pub fn word_of(&self, piece: usize) -> Option<usize> {
        self.piece_to_word.get(piece).copied()
    }

    /// Piece range covered by a word span
    pub fn piece_span(&self, words: WordSpan) -> Option<PieceSpan> {
        let first = self.word_to_piece.get(words.start)?;
        let last = self.word_to_piece.get(words.end)?;
        Some(PieceSpan::new(first.start, last.end))
    }
}
