use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

/// True only for a 24-character hexadecimal string. Syntax only.
pub fn is_valid_object_id(candidate: &str) -> bool {
    parse_object_id(candidate).is_some()
}

pub fn parse_object_id(candidate: &str) -> Option<ObjectId> {
    if candidate.len() != 24 {
        return None;
    }
    ObjectId::parse_str(candidate).ok()
}

/// `validator` check rejecting empty or whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_ids() {
        assert!(is_valid_object_id("65e764e6275e99bd7b4ea435"));
        assert!(is_valid_object_id(&ObjectId::new().to_hex()));
    }

    #[test]
    fn test_invalid_object_ids() {
        assert!(!is_valid_object_id("abc"));
        assert!(!is_valid_object_id(""));
        assert!(!is_valid_object_id("65e764e6275e99bd7b4ea43"));
        assert!(!is_valid_object_id("65e764e6275e99bd7b4ea4355"));
        assert!(!is_valid_object_id("zze764e6275e99bd7b4ea435"));
    }

    #[test]
    fn test_parse_object_id_round_trips_hex() {
        let hex = "65e764e6275e99bd7b4ea435";
        assert_eq!(parse_object_id(hex).map(|id| id.to_hex()), Some(hex.to_string()));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Cerradura").is_ok());
        assert!(validate_not_blank("").is_err());

        let err = validate_not_blank("   ").unwrap_err();
        assert_eq!(err.code, "blank");
    }
}
