use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::aggregator::{Aggregator, Tokens};
use super::tokenizer::SignatureTokenizer;

/// Assigns TF-IDF token weights to every aggregated signature.
///
/// A token's inverse document frequency is `ln(N / (df + 1))` over the `N`
/// signatures of the run; its weight in a signature is `count * idf`, scaled
/// so that the weights of one signature sum to 100.
pub struct TokenWeighter {
    tokenizer: SignatureTokenizer,
}

impl TokenWeighter {
    pub fn new() -> Self {
        Self {
            tokenizer: SignatureTokenizer::new(),
        }
    }

    pub fn apply(&self, aggregator: &mut Aggregator) {
        let counts: Vec<BTreeMap<String, u64>> = aggregator
            .iter_mut()
            .map(|(signature, _)| self.tokenizer.tokenize(signature))
            .collect();

        let mut document_frequency: HashMap<&str, u64> = HashMap::new();
        for tokens in &counts {
            for token in tokens.keys() {
                *document_frequency.entry(token.as_str()).or_insert(0) += 1;
            }
        }
        debug!("Weighting {} distinct tokens over {} signatures", document_frequency.len(), counts.len());

        let documents = counts.len() as f64;
        for ((_, entry), tokens) in aggregator.iter_mut().zip(&counts) {
            let mut weights: BTreeMap<String, f64> = tokens
                .iter()
                .map(|(token, &count)| {
                    let frequency = document_frequency.get(token.as_str()).copied().unwrap_or(0);
                    let idf = (documents / (frequency + 1) as f64).ln();
                    (token.clone(), count as f64 * idf)
                })
                .collect();

            normalize(&mut weights);
            entry.tokens = Tokens::Weighted(weights);
        }
    }
}

impl Default for TokenWeighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale weights to sum to 100; a zero sum leaves them untouched
fn normalize(weights: &mut BTreeMap<String, f64>) {
    let sum: f64 = weights.values().sum();
    if sum == 0.0 || !sum.is_finite() {
        return;
    }

    for weight in weights.values_mut() {
        *weight = *weight * 100.0 / sum;
    }
}
