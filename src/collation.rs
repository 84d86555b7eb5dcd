//! Fixed pt-BR string collation.
//!
//! Strings are ordered by base letters first (case and accents ignored), then
//! by accents, position by position. Case never distinguishes two strings, so
//! `"ana"` and `"Ana"` compare equal and a stable sort keeps their input order.
//! Within base letters the order is that of the unaccented code points, which
//! places spaces and punctuation before digits and digits before letters.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Precomputed sort key; build once per value when sorting many rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<char>,
    secondary: Vec<Vec<char>>,
}

impl CollationKey {
    pub fn new(value: &str) -> Self {
        let mut primary = Vec::with_capacity(value.len());
        let mut secondary: Vec<Vec<char>> = Vec::with_capacity(value.len());
        for ch in value.to_lowercase().nfd() {
            if is_combining_mark(ch) {
                if let Some(marks) = secondary.last_mut() {
                    marks.push(ch);
                }
            } else {
                primary.push(ch);
                secondary.push(Vec::new());
            }
        }
        Self { primary, secondary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case() {
        assert_eq!(compare("Centro", "centro"), Ordering::Equal);
        assert_eq!(compare("analista 2", "Analista 10"), Ordering::Greater);
    }

    #[test]
    fn base_letters_outrank_accents() {
        assert_eq!(compare("Méier", "Meier"), Ordering::Greater);
        assert_eq!(compare("Méier", "Mesquita"), Ordering::Less);
        assert_eq!(compare("Heliópolis", "Helio"), Ordering::Greater);
        assert_eq!(compare("São João", "Sao Joao"), Ordering::Greater);
    }

    #[test]
    fn orders_status_labels_like_the_dashboard() {
        let mut labels = vec![
            "Não Iniciado",
            "Concluída",
            "Em Atendimento",
            "Aguardando Solicitante",
        ];
        labels.sort_by(|a, b| compare(a, b));
        assert_eq!(
            labels,
            vec![
                "Aguardando Solicitante",
                "Concluída",
                "Em Atendimento",
                "Não Iniciado"
            ]
        );
    }

    #[test]
    fn empty_sorts_first() {
        assert_eq!(compare("", "a"), Ordering::Less);
        assert_eq!(compare("", ""), Ordering::Equal);
    }
}
