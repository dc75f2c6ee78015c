use crate::DomainError;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Canonical at-rest form: no trailing dot, ASCII lower-case.
pub fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

pub fn validate_domain_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "{} exceeds {} characters",
            name, MAX_NAME_LEN
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "{} contains an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label {} exceeds {} characters",
                label, MAX_LABEL_LEN
            )));
        }
        let valid = label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::InvalidDomainName(format!(
                "label {} contains invalid characters",
                label
            )));
        }
    }

    Ok(())
}

pub fn is_fully_qualified(name: &str) -> bool {
    name.ends_with('.')
}

/// Completes a stored name to an FQDN under `apex`.
///
/// Empty means the apex itself, a trailing dot means the value is already
/// absolute, anything else is relative to the apex.
pub fn complete_fqdn(prefix_or_fqdn: &str, apex: &str) -> String {
    if prefix_or_fqdn.is_empty() {
        format!("{}.", apex)
    } else if is_fully_qualified(prefix_or_fqdn) {
        prefix_or_fqdn.to_string()
    } else {
        format!("{}.{}.", prefix_or_fqdn, apex)
    }
}

/// Strips `apex` from a normalized query name.
///
/// Returns `""` for the apex itself and `None` when `name` is not inside
/// `apex` on a label boundary.
pub fn relative_name<'a>(name: &'a str, apex: &str) -> Option<&'a str> {
    if name == apex {
        return Some("");
    }
    let prefix = name.strip_suffix(apex)?;
    let relative = prefix.strip_suffix('.')?;
    if relative.is_empty() {
        return None;
    }
    Some(relative)
}
