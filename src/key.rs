use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub fn normalize_key(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_case_and_punctuation() {
        assert_eq!(normalize_key("Situação"), "situacao");
        assert_eq!(normalize_key("situacao"), "situacao");
        assert_eq!(normalize_key("Data de Abertura"), "datadeabertura");
        assert_eq!(normalize_key("Nº Protocolo"), "nprotocolo");
        assert_eq!(normalize_key("  Órgão/Setor "), "orgaosetor");
    }

    #[test]
    fn empty_and_symbol_only_inputs_yield_empty_keys() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("--- ###"), "");
    }
}
