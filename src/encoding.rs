// Repair of mis-decoded accented characters in the raw CSV text.
//
// The source file is declared as Windows-1252 but reaches us after an
// earlier UTF-8 interpretation pass, so every accented letter arrives as the
// replacement character U+FFFD. Repair is two ordered passes of literal
// find-and-replace: whole words and phrases first (where context decides the
// letter), then single characters. The phrase pass must run first or the
// character pass would corrupt multi-letter names like "Arêa Leão".

/// Proper nouns and domain terms where a generic single-character fix would
/// pick the wrong letter. Checked before the character table.
const PHRASE_FIXES: &[(&str, &str)] = &[
    ("S\u{fffd}o", "São"),
    ("Ar\u{fffd}a Le\u{fffd}o", "Arêa Leão"),
    ("An\u{fffd}sio", "Anísio"),
    ("Jos\u{fffd} dos Santos", "José dos Santos"),
    ("N\u{fffd}MERO", "NÚMERO"),
    ("N\u{fffd}mero", "Número"),
    ("Pr\u{fffd}dio", "Prédio"),
    ("\u{fffd}lvaro", "Álvaro"),
    ("F\u{fffd}lix", "Félix"),
    ("Jo\u{fffd}o", "João"),
    ("Ara\u{fffd}jo", "Araújo"),
    ("Simpl\u{fffd}cio", "Simplício"),
    ("Gra\u{fffd}as", "Graças"),
    ("Bocai\u{fffd}va", "Bocaiúva"),
    ("Constru\u{fffd}\u{fffd}o", "Construção"),
    ("Edifica\u{fffd}\u{fffd}o", "Edificação"),
    ("Demoli\u{fffd}\u{fffd}o", "Demolição"),
    ("Situa\u{fffd}\u{fffd}o", "Situação"),
    ("Preven\u{fffd}\u{fffd}o", "Prevenção"),
    ("Aten\u{fffd}\u{fffd}o", "Atenção"),
    ("Informa\u{fffd}\u{fffd}o", "Informação"),
    ("Solu\u{fffd}\u{fffd}o", "Solução"),
    ("Execu\u{fffd}\u{fffd}o", "Execução"),
    ("Fiscaliza\u{fffd}\u{fffd}o", "Fiscalização"),
    ("Regulariza\u{fffd}\u{fffd}o", "Regularização"),
];

/// Single-character fallbacks, one entry per accented letter of the
/// orthography. Applied in order after the phrase pass; the earliest entry
/// wins for any replacement character the phrases did not claim.
const CHAR_FIXES: &[(&str, &str)] = &[
    ("\u{fffd}", "ú"),
    ("\u{fffd}", "ã"),
    ("\u{fffd}", "ç"),
    ("\u{fffd}", "ó"),
    ("\u{fffd}", "á"),
    ("\u{fffd}", "é"),
    ("\u{fffd}", "í"),
    ("\u{fffd}", "â"),
    ("\u{fffd}", "ê"),
    ("\u{fffd}", "ô"),
    ("\u{fffd}", "õ"),
    ("\u{fffd}", "à"),
    ("\u{fffd}", "ü"),
    ("\u{fffd}", "Á"),
    ("\u{fffd}", "É"),
    ("\u{fffd}", "Í"),
    ("\u{fffd}", "Ó"),
    ("\u{fffd}", "Ú"),
    ("\u{fffd}", "Â"),
    ("\u{fffd}", "Ê"),
    ("\u{fffd}", "Ô"),
    ("\u{fffd}", "Ã"),
    ("\u{fffd}", "Õ"),
    ("\u{fffd}", "Ç"),
];

/// Fix "Jos\u{fffd}" wherever the next character is not a letter (field
/// separator, punctuation, newline or end of input). When a letter follows,
/// the corruption belongs to a longer name and is left for the other tables.
fn fix_jose(text: &str) -> String {
    const CORRUPTED: &str = "Jos\u{fffd}";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(CORRUPTED) {
        let after = &rest[idx + CORRUPTED.len()..];
        let followed_by_letter = after
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic());
        out.push_str(&rest[..idx]);
        out.push_str(if followed_by_letter { CORRUPTED } else { "José" });
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Repair mis-decoded text before structured parsing.
///
/// Both tables are applied as sequential, global, literal substitutions in
/// declaration order, with the contextual "José" fix between them. A
/// corrupted character matched by no entry passes through unchanged; that is
/// a visible cosmetic limitation, not an error.
pub fn repair(raw: &str) -> String {
    let mut text = raw.to_string();
    for &(from, to) in PHRASE_FIXES {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text = fix_jose(&text);
    for &(from, to) in CHAR_FIXES {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::repair;

    #[test]
    fn phrase_fix_wins_over_char_fix() {
        // "S�o" must become "São", not "Súo" (the char table's first entry).
        assert_eq!(repair("S\u{fffd}o Pedro"), "São Pedro");
    }

    #[test]
    fn double_corruption_in_names() {
        assert_eq!(repair("Rua Ar\u{fffd}a Le\u{fffd}o"), "Rua Arêa Leão");
        assert_eq!(repair("Constru\u{fffd}\u{fffd}o"), "Construção");
    }

    #[test]
    fn corrupted_header_is_repaired() {
        assert_eq!(repair("N\u{fffd}MERO"), "NÚMERO");
    }

    #[test]
    fn jose_repaired_before_any_non_letter() {
        assert_eq!(repair("Jos\u{fffd} da Silva"), "José da Silva");
        assert_eq!(repair("Rua Jos\u{fffd};123"), "Rua José;123");
        // End of line, end of input and other punctuation all count as
        // "not a letter", so none of these fall through to the char table.
        assert_eq!(repair("Jos\u{fffd}\nOutra"), "José\nOutra");
        assert_eq!(repair("Praça Jos\u{fffd}"), "Praça José");
        assert_eq!(repair("Jos\u{fffd}-Filho"), "José-Filho");
    }

    #[test]
    fn jose_followed_by_letter_is_left_for_other_fixes() {
        // A longer corrupted name is not "José": the char table resolves
        // its replacement character instead.
        assert_eq!(repair("Jos\u{fffd}fa"), "Josúfa");
    }

    #[test]
    fn lone_character_falls_back_to_char_table() {
        // Outside any known phrase the first character entry applies.
        assert_eq!(repair("abac\u{fffd}"), "abacú");
    }

    #[test]
    fn clean_text_is_untouched() {
        let s = "Rua Coelho Rodrigues, 1234 - Centro";
        assert_eq!(repair(s), s);
    }
}
