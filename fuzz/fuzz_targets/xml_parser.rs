#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlparse::{parse, parse_bytes, parse_with_filter, Config, Node, NodeKind};

fuzz_target!(|data: &[u8]| {
    let _ = parse_bytes(data);
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = parse(s) {
            // a parsed document always re-parses from its own serialization
            let again = parse(&doc.to_string());
            assert!(again.is_ok());
        }
        let config = Config::default().with_strip_comments(true).with_trim(false);
        let _ = parse_with_filter(s, config, |node: &Node| node.kind() != NodeKind::Text);
    }
});
