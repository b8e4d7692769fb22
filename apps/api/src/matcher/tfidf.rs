#![allow(dead_code)]

//! From-scratch TF-IDF vector space model.
//!
//! Fit once over the request corpus (job description plus every résumé),
//! then project any document into the shared space. The vocabulary keeps
//! insertion order, so vector components line up across every `transform`
//! call on the same fitted model.

use std::collections::{HashMap, HashSet};

use crate::matcher::text::tokenize;

pub struct TfIdfVectorizer {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Builds the vocabulary, document frequencies, and IDF table from the
    /// corpus. Document frequency counts documents containing a token at
    /// least once, not occurrences; `idf = ln(N / (1 + df))` with N the
    /// corpus size. Fitting is a one-shot construction: a new corpus means
    /// a new vectorizer.
    pub fn fit(documents: &[String]) -> Self {
        let mut vocabulary: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let mut seen: HashSet<usize> = HashSet::new();
            for token in tokenize(document) {
                let slot = match index.get(&token) {
                    Some(&slot) => slot,
                    None => {
                        let slot = vocabulary.len();
                        vocabulary.push(token.clone());
                        index.insert(token, slot);
                        document_frequency.push(0);
                        slot
                    }
                };
                if seen.insert(slot) {
                    document_frequency[slot] += 1;
                }
            }
        }

        let total_documents = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| (total_documents / (1.0 + df as f64)).ln())
            .collect();

        Self {
            vocabulary,
            index,
            idf,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Projects a document into the fitted space: component `i` is
    /// `tf(vocabulary[i]) * idf[i]`, with term frequency normalized by the
    /// document's token count. A document with no tokens (or none in the
    /// vocabulary) yields the all-zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        let tokens = tokenize(document);
        if tokens.is_empty() {
            return vector;
        }

        let total_tokens = tokens.len() as f64;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        for (token, count) in counts {
            if let Some(&slot) = self.index.get(token) {
                vector[slot] = (count as f64 / total_tokens) * self.idf[slot];
            }
        }

        vector
    }
}
