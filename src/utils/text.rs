/// URL slug for a title or name. Turkish letters are transliterated
/// (`ş` → `s`, `ğ` → `g`, `ı` → `i`).
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text)
}

/// Cut `text` to at most `max_chars` characters without splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_transliterates_turkish() {
        assert_eq!(slugify("Yapay Zekâ ve Edebiyat"), "yapay-zeka-ve-edebiyat");
        assert_eq!(slugify("Çağdaş Şiir Üzerine"), "cagdas-siir-uzerine");
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slugify("Prompt  Engineering: 101!"), "prompt-engineering-101");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("çğışöü", 3), "çğı");
        assert_eq!(truncate_chars("kısa", 60), "kısa");
    }
}
