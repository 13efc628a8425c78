use proptest::prelude::*;
use seedrun::seed::decode::Utf8ChunkDecoder;

#[test]
fn split_multibyte_character_is_held_back() {
    let mut decoder = Utf8ChunkDecoder::new();
    let bytes = "ü".as_bytes();

    assert_eq!(decoder.decode(&bytes[..1]), "");
    assert!(decoder.has_pending());
    assert_eq!(decoder.decode(&bytes[1..]), "ü");
    assert!(!decoder.has_pending());
}

#[test]
fn invalid_bytes_become_replacement_characters() {
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(b"ok\xFFok"), "ok\u{FFFD}ok");
}

#[test]
fn truncated_tail_is_flushed_lossily() {
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(b"abc\xE2\x82"), "abc");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert_eq!(decoder.finish(), "");
}

proptest! {
    #[test]
    fn arbitrary_split_points_decode_to_the_same_text(
        text in "\\PC{0,64}",
        cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let bytes = text.as_bytes();
        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(bytes.len() + 1)).collect();
        points.sort_unstable();

        let mut decoder = Utf8ChunkDecoder::new();
        let mut out = String::new();
        let mut start = 0;
        for point in points {
            out.push_str(&decoder.decode(&bytes[start..point]));
            start = point;
        }
        out.push_str(&decoder.decode(&bytes[start..]));
        out.push_str(&decoder.finish());

        prop_assert_eq!(out, text);
    }
}
