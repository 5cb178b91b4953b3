//! Vietnamese text folding.
//!
//! The backend stores statuses, roles and payment methods as free text
//! ("Đã Duyệt", "chờ xác nhận", "Tiền mặt"). Every comparison against that
//! text goes through [`fold`] so matching is insensitive to case, tone
//! marks and vowel modifiers.

/// Lowercases `input`, strips Vietnamese diacritics and collapses runs of
/// whitespace into a single space.
///
/// Both precomposed characters and decomposed sequences (base letter plus
/// combining marks) fold to the same ASCII letter.
#[must_use]
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if is_combining_mark(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(base_letter(ch));
    }

    out
}

/// Returns true if `needle` (already folded) occurs in the folded `haystack`.
#[must_use]
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(needle)
}

const fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036F}')
}

fn base_letter(ch: char) -> char {
    match ch {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ' | 'ẩ'
        | 'ẫ' | 'ậ' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ' | 'ở'
        | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'đ' => 'd',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Đã Duyệt", "da duyet")]
    #[case("da duyet", "da duyet")]
    #[case("CHỜ XÁC NHẬN", "cho xac nhan")]
    #[case("  Tạo   mới ", "tao moi")]
    #[case("Đã hủy", "da huy")]
    #[case("Từ chối", "tu choi")]
    #[case("Hoàn thành", "hoan thanh")]
    #[case("Tiền mặt", "tien mat")]
    #[case("", "")]
    fn test_fold(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold(input), expected);
    }

    #[test]
    fn test_fold_decomposed_input() {
        // "duyệt" written as base letters plus combining marks
        let decomposed = "duye\u{0302}\u{0323}t";
        assert_eq!(fold(decomposed), "duyet");
    }

    #[test]
    fn test_fold_is_idempotent() {
        let once = fold("Quản Lý Kho");
        assert_eq!(fold(&once), once);
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Chờ duyệt", "duyet"));
        assert!(!contains_folded("Tạo mới", "duyet"));
    }
}
