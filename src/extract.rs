use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

// Hostname shape: dotted labels of alphanumerics with optional inner
// hyphens, 63 chars per label, final label at least 2 chars. Matching is
// done on a lowercased copy, so the pattern only needs the lowercase range.
static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]")
        .unwrap()
});

/// Every domain-shaped substring of a fetched document, in document order,
/// duplicates included. Works on any text format (hosts files, unbound
/// configs, JSON arrays) since it never parses structure, only matches.
pub fn extract_domains(body: &str) -> Vec<String> {
    let lowered = body.to_lowercase();
    DOMAIN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

pub fn dedup_first_seen(domains: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut unique = Vec::with_capacity(domains.len());
    for domain in domains {
        if !seen.contains(domain.as_str()) {
            seen.insert(domain.clone());
            unique.push(domain);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_document_order_with_duplicates() {
        let body = "ads.example.com tracking-junk.example.com ads.example.com";
        assert_eq!(
            extract_domains(body),
            vec![
                "ads.example.com",
                "tracking-junk.example.com",
                "ads.example.com"
            ]
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let body = "0.0.0.0 doubleclick.net\n0.0.0.0 ad.server.io\n";
        assert_eq!(extract_domains(body), extract_domains(body));
    }

    #[test]
    fn test_uppercase_input_is_normalized() {
        assert_eq!(extract_domains("ADS.Example.COM"), vec!["ads.example.com"]);
    }

    #[test]
    fn test_hosts_file_lines() {
        let body = "# comment\n127.0.0.1 localhost\n0.0.0.0 tracker.example.net # inline\n";
        let domains = extract_domains(body);
        assert!(domains.contains(&"tracker.example.net".to_string()));
        // Sentinel IPs never form a hostname: their final label is one char.
        assert!(!domains.contains(&"0.0.0.0".to_string()));
        assert!(!domains.contains(&"127.0.0.1".to_string()));
    }

    #[test]
    fn test_json_body() {
        let body = r#"["mailinator.com","throwaway.example.org"]"#;
        assert_eq!(
            extract_domains(body),
            vec!["mailinator.com", "throwaway.example.org"]
        );
    }

    #[test]
    fn test_no_matches_yields_empty() {
        assert!(extract_domains("").is_empty());
        assert!(extract_domains("no domains here, just words").is_empty());
    }

    #[test]
    fn test_label_length_limit() {
        let long = "a".repeat(64);
        let domains = extract_domains(&format!("{long}.com"));
        // A 64-char label is over the limit; the match starts one char in.
        assert_eq!(domains, vec![format!("{}.com", "a".repeat(63))]);
    }

    #[test]
    fn test_single_char_final_label_rejected() {
        assert!(extract_domains("x.a").is_empty());
        assert_eq!(extract_domains("cdn.io"), vec!["cdn.io"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let input = vec![
            "b.example.com".to_string(),
            "a.example.com".to_string(),
            "b.example.com".to_string(),
            "c.example.com".to_string(),
            "a.example.com".to_string(),
        ];
        assert_eq!(
            dedup_first_seen(input),
            vec!["b.example.com", "a.example.com", "c.example.com"]
        );
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![
            "x.example.com".to_string(),
            "y.example.com".to_string(),
            "x.example.com".to_string(),
        ];
        let once = dedup_first_seen(input);
        let twice = dedup_first_seen(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_output_membership() {
        let input: Vec<String> = ["a.io", "b.io", "a.io", "c.io", "b.io", "a.io"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = dedup_first_seen(input.clone());
        for domain in &output {
            assert_eq!(output.iter().filter(|d| *d == domain).count(), 1);
            assert!(input.contains(domain));
        }
    }
}
