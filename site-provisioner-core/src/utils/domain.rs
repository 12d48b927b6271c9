//! 域名校验

use crate::error::{CoreError, CoreResult};

/// Maximum length of a full domain name.
const MAX_DOMAIN_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// Normalizes `domain` to its ASCII (punycode) form and checks it is a registrable name:
/// at least two labels of letters, digits and inner hyphens, alphabetic TLD.
pub fn validate_domain(domain: &str) -> CoreResult<String> {
    let domain = domain.trim().trim_end_matches('.');
    if domain.is_empty() {
        return Err(CoreError::Validation("domain name is empty".to_string()));
    }

    // IDNA: lowercases, maps Unicode labels to punycode, rejects STD3-invalid names
    let name = idna::domain_to_ascii_strict(domain)
        .map_err(|_| CoreError::Validation(format!("invalid domain name: {domain}")))?;
    if name.len() > MAX_DOMAIN_LEN {
        return Err(CoreError::Validation(format!(
            "domain name exceeds {MAX_DOMAIN_LEN} characters (got {})",
            name.len()
        )));
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(CoreError::Validation(format!(
            "'{name}' has no top-level domain"
        )));
    }

    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(CoreError::Validation(format!(
                "'{name}' has an empty or over-long label"
            )));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(CoreError::Validation(format!(
                "label '{label}' starts or ends with a hyphen"
            )));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(CoreError::Validation(format!(
                "label '{label}' contains invalid characters"
            )));
        }
    }

    // punycode TLDs ("xn--p1ai") are allowed
    let tld = labels[labels.len() - 1];
    if !(tld.starts_with("xn--") || tld.chars().all(|c| c.is_ascii_alphabetic())) {
        return Err(CoreError::Validation(format!("invalid top-level domain '{tld}'")));
    }

    Ok(name)
}
