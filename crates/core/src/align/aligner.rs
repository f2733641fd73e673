//! Span aligner: transfers source entity spans onto translated text

use crate::align::attention::AttentionMatrix;
use crate::align::mapping::PieceWordMap;
use crate::align::span::{pair_spans, PieceSpan, WordSpan};
use crate::align::substring::{count_substring, find_overlap};
use crate::align::AlignerConfig;
use crate::error::{Error, Result};
use crate::traits::tokenizer::{DetokenizeSide, PieceTokenizer};
use std::borrow::Cow;

/// A mention the translator kept verbatim, located lexically
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Mention text
    pub mention: String,

    /// Target words holding the occurrence
    pub target_words: WordSpan,

    /// Target pieces holding the occurrence
    pub target_pieces: PieceSpan,
}

/// A mention placed with attention and substituted into the output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    /// Source mention text
    pub mention: String,

    /// Source pieces of the annotated span
    pub source_pieces: PieceSpan,

    /// Target pieces claimed by the mention
    pub target_pieces: PieceSpan,

    /// Target words replaced by the mention
    pub target_words: WordSpan,

    /// Attention ranks ran out and the target overlaps an earlier claim
    pub overlapping: bool,
}

/// Result of aligning one translated example
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    /// Target text with the attention-aligned mentions substituted
    pub text: String,

    /// Mentions found verbatim in the target
    pub literal_matches: Vec<LiteralMatch>,

    /// Mentions placed with attention, in substitution order
    ///
    /// One entry per annotated span, so a span annotated twice is placed
    /// and substituted twice.
    pub replacements: Vec<Replacement>,

    /// Every target piece range claimed during alignment, in claim order
    pub used_spans: Vec<PieceSpan>,
}

/// Transfers annotated spans from a source utterance to its translation
pub struct SpanAligner<'a, T: PieceTokenizer + ?Sized> {
    tokenizer: &'a T,
    config: AlignerConfig,
}

impl<'a, T: PieceTokenizer + ?Sized> SpanAligner<'a, T> {
    /// Create an aligner with default config
    pub fn new(tokenizer: &'a T) -> Self {
        Self::with_config(tokenizer, AlignerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(tokenizer: &'a T, config: AlignerConfig) -> Self {
        Self { tokenizer, config }
    }

    /// Get the config
    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Align source spans onto the target and rebuild the target text
    ///
    /// `source_spans` is the flat `start, end, ...` list of inclusive source
    /// word spans. An odd-length list fails with [`Error::SpanFormat`].
    pub fn align(
        &self,
        source_tokens: &[String],
        target_tokens: &[String],
        attention: &AttentionMatrix,
        source_spans: &[usize],
    ) -> Result<Alignment> {
        let source_tokens = self.isolate_unknown(source_tokens);

        let source_text = self
            .tokenizer
            .convert_tokens_to_string(&source_tokens, DetokenizeSide::Source)?;
        let spans = pair_spans(source_spans).ok_or_else(|| Error::SpanFormat(source_text.clone()))?;

        let source_map = PieceWordMap::build(&source_tokens, self.tokenizer);
        let target_map = PieceWordMap::build(target_tokens, self.tokenizer);

        let target_text = self
            .tokenizer
            .convert_tokens_to_string(target_tokens, DetokenizeSide::Target)?;
        let source_words: Vec<&str> = source_text.split(' ').collect();
        let target_words: Vec<&str> = target_text.split(' ').collect();

        // identical mentions share one group, kept in first-seen order
        let mut groups: Vec<(&[&str], Vec<WordSpan>)> = Vec::new();
        for span in spans {
            let mention = mention_words(&source_words, span)?;
            match groups.iter_mut().find(|(m, _)| *m == mention) {
                Some((_, group)) => group.push(span),
                None => groups.push((mention, vec![span])),
            }
        }

        let mut used_spans: Vec<PieceSpan> = Vec::new();
        let mut literal_matches = Vec::new();
        let mut worklist: Vec<(&[&str], WordSpan)> = Vec::new();

        for (mention, group) in groups {
            let (count, begins) = count_substring(&target_words, mention);
            if count != group.len() {
                worklist.extend(group.into_iter().map(|span| (mention, span)));
                continue;
            }

            for begin in begins {
                let words = WordSpan::new(begin, begin + mention.len() - 1);
                match target_map.piece_span(words) {
                    Some(pieces) => {
                        used_spans.push(pieces);
                        literal_matches.push(LiteralMatch {
                            mention: mention.join(" "),
                            target_words: words,
                            target_pieces: pieces,
                        });
                    }
                    None => log::debug!(
                        "Literal match {} of '{}' has no target pieces, skipping",
                        words,
                        mention.join(" ")
                    ),
                }
            }
        }

        let last_target = target_tokens.len().saturating_sub(1);
        let mut replacements = Vec::with_capacity(worklist.len());
        for (mention, words) in worklist {
            let source_pieces = source_map.piece_span(words).ok_or_else(|| {
                Error::Alignment(format!(
                    "Source span {} is outside the {} tokenized source words",
                    words,
                    source_map.num_words()
                ))
            })?;

            let target_pieces = self.resolve_target(attention, source_pieces, &used_spans, last_target)?;
            let overlapping = find_overlap(target_pieces.start, target_pieces.end, &used_spans).is_some();
            used_spans.push(target_pieces);

            let start = target_map.word_of(target_pieces.start).unwrap_or(0);
            let end = target_map.word_of(target_pieces.end).unwrap_or(0);
            let target_words_span = WordSpan::new(
                start.min(target_words.len()),
                end.min(target_words.len()),
            );

            log::debug!(
                "Aligned '{}' source pieces {} to target pieces {}",
                mention.join(" "),
                source_pieces,
                target_pieces
            );

            replacements.push(Replacement {
                mention: mention.join(" "),
                source_pieces,
                target_pieces,
                target_words: target_words_span,
                overlapping,
            });
        }

        let text = self.reassemble(&target_words, &replacements);

        Ok(Alignment {
            text,
            literal_matches,
            replacements,
            used_spans,
        })
    }

    /// Align and return only the rebuilt target text
    pub fn align_and_replace(
        &self,
        source_tokens: &[String],
        target_tokens: &[String],
        attention: &AttentionMatrix,
        source_spans: &[usize],
    ) -> Result<String> {
        Ok(self.align(source_tokens, target_tokens, attention, source_spans)?.text)
    }

    fn isolate_unknown<'t>(&self, tokens: &'t [String]) -> Cow<'t, [String]> {
        if !self.tokenizer.isolates_unknown() || !tokens.iter().any(|t| self.tokenizer.is_unknown(t)) {
            return Cow::Borrowed(tokens);
        }
        Cow::Owned(
            tokens
                .iter()
                .map(|token| {
                    if self.tokenizer.is_unknown(token) {
                        self.tokenizer.mark_word_start(token)
                    } else {
                        token.clone()
                    }
                })
                .collect(),
        )
    }

    /// Pick a target piece range for a source span, avoiding claimed ranges
    ///
    /// Start and end follow the attention argmax of the span's first and
    /// last source piece. A candidate overlapping a claimed range is shrunk
    /// to the side of it that the candidate starts or ends on; otherwise the
    /// next attention rank is tried. When the ranks run out the last
    /// candidate is kept even if it still overlaps.
    fn resolve_target(
        &self,
        attention: &AttentionMatrix,
        source: PieceSpan,
        used: &[PieceSpan],
        last_target: usize,
    ) -> Result<PieceSpan> {
        let mut rank = 1;
        let mut candidate = ranked_candidate(attention, source, rank, last_target)?;

        while let Some(idx) = find_overlap(candidate.start, candidate.end, used) {
            let other = used[idx];
            if candidate.start < other.start && candidate.end < other.end {
                candidate.end = other.start - 1;
            } else if candidate.start >= other.start && candidate.end > other.end {
                candidate.start = other.end + 1;
            } else {
                rank += 1;
                if rank >= attention.num_targets() {
                    log::warn!(
                        "Attention ranks exhausted for source pieces {}, keeping overlapping target {}",
                        source,
                        candidate
                    );
                    break;
                }
                candidate = ranked_candidate(attention, source, rank, last_target)?;
            }
            candidate = candidate.ordered();
        }

        Ok(candidate)
    }

    fn reassemble(&self, target_words: &[&str], replacements: &[Replacement]) -> String {
        let mut output: Vec<Cow<'_, str>> = Vec::with_capacity(target_words.len());
        let mut cursor = 0;

        for replacement in replacements {
            let WordSpan { start, end } = replacement.target_words;
            if start > cursor {
                output.extend(target_words[cursor..start].iter().map(|w| Cow::Borrowed(*w)));
            }
            output.push(Cow::Owned(self.config.render_mention(&replacement.mention)));
            cursor = end + 1;
        }
        if cursor < target_words.len() {
            output.extend(target_words[cursor..].iter().map(|w| Cow::Borrowed(*w)));
        }

        output.join(" ")
    }
}

fn mention_words<'w>(words: &'w [&'w str], span: WordSpan) -> Result<&'w [&'w str]> {
    if span.is_empty() {
        return Ok(&[]);
    }
    words.get(span.start..=span.end).ok_or_else(|| {
        Error::Alignment(format!(
            "Source span {} is outside the {} source words",
            span,
            words.len()
        ))
    })
}

fn ranked_candidate(
    attention: &AttentionMatrix,
    source: PieceSpan,
    rank: usize,
    last_target: usize,
) -> Result<PieceSpan> {
    let lookup = |piece: usize| {
        attention
            .ranked_target(piece, rank)
            .map(|target| target.min(last_target))
            .ok_or_else(|| {
                Error::Attention(format!(
                    "No rank-{} target for source piece {} in a {}x{} attention matrix",
                    rank,
                    piece,
                    attention.num_targets(),
                    attention.num_sources()
                ))
            })
    };
    Ok(PieceSpan::new(lookup(source.start)?, lookup(source.end)?).ordered())
}

/// Align source spans onto a translation and substitute the source mentions
///
/// Convenience wrapper over [`SpanAligner`] with the default quotation
/// symbol.
pub fn align_and_replace<T: PieceTokenizer + ?Sized>(
    source_tokens: &[String],
    target_tokens: &[String],
    tokenizer: &T,
    attention: &AttentionMatrix,
    source_spans: &[usize],
    remove_quotes: bool,
) -> Result<String> {
    let config = AlignerConfig::default().with_remove_quotes(remove_quotes);
    SpanAligner::with_config(tokenizer, config).align_and_replace(
        source_tokens,
        target_tokens,
        attention,
        source_spans,
    )
}
