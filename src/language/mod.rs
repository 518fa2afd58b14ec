use whatlang::Lang;

/// Sentinel returned when no language can be determined
pub const UNKNOWN: &str = "unknown";

/// Best-guess language code for a text, or `"unknown"`.
///
/// Detection is fully deterministic: the same input always yields the same
/// code. This function never fails - empty, too-short, or undetectable input
/// all map to the sentinel.
pub fn detect(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }

    match whatlang::detect(trimmed) {
        Some(info) => iso639_1(info.lang())
            .unwrap_or_else(|| info.lang().code())
            .to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Map whatlang's ISO 639-3 languages to the two-letter codes the rest of
/// the tool speaks. Languages without a mapping fall back to the 639-3 code.
fn iso639_1(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Eng => Some("en"),
        Lang::Spa => Some("es"),
        Lang::Fra => Some("fr"),
        Lang::Deu => Some("de"),
        Lang::Cmn => Some("zh"),
        Lang::Hin => Some("hi"),
        Lang::Ara => Some("ar"),
        Lang::Rus => Some("ru"),
        Lang::Jpn => Some("ja"),
        Lang::Por => Some("pt"),
        Lang::Ita => Some("it"),
        Lang::Kor => Some("ko"),
        Lang::Nld => Some("nl"),
        Lang::Tur => Some("tr"),
        Lang::Ukr => Some("uk"),
        Lang::Pol => Some("pl"),
        Lang::Swe => Some("sv"),
        Lang::Dan => Some("da"),
        Lang::Fin => Some("fi"),
        Lang::Ell => Some("el"),
        Lang::Heb => Some("he"),
        Lang::Vie => Some("vi"),
        Lang::Tha => Some("th"),
        Lang::Ind => Some("id"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        let text = "The quick brown fox jumps over the lazy dog and keeps on running.";
        assert_eq!(detect(text), "en");
    }

    #[test]
    fn test_detect_spanish() {
        let text = "El rápido zorro marrón salta sobre el perro perezoso cada mañana.";
        assert_eq!(detect(text), "es");
    }

    #[test]
    fn test_detect_is_deterministic() {
        let text = "Ceci est une phrase française assez longue pour être détectée.";
        let first = detect(text);
        for _ in 0..10 {
            assert_eq!(detect(text), first);
        }
    }

    #[test]
    fn test_empty_and_whitespace_are_unknown() {
        assert_eq!(detect(""), UNKNOWN);
        assert_eq!(detect("   \n\t "), UNKNOWN);
    }

    #[test]
    fn test_detect_never_panics_on_noise() {
        // Symbols and digits carry no language signal but must not fail
        let _ = detect("1234 5678 !!! ???");
        let _ = detect("....");
    }
}
