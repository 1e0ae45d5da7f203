//! Shipping address validation.

use super::models::ShippingAddress;

/// Minimum length, after trimming, per required field.
const MIN_NAME: usize = 2;
const MIN_ADDRESS_LINE: usize = 5;
const MIN_CITY: usize = 2;
const MIN_STATE: usize = 2;
const MIN_POSTAL_CODE: usize = 3;
const MIN_COUNTRY: usize = 2;
const MIN_PHONE: usize = 10;

/// Validate a shipping address in one pass.
///
/// Every failing field is reported, not just the first, so a checkout form
/// can highlight all of them at once.
///
/// # Errors
///
/// Returns the full list of field messages when any check fails.
pub fn validate(address: &ShippingAddress) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let checks: [(&str, usize, &str); 7] = [
        (&address.full_name, MIN_NAME, "Full name is required"),
        (
            &address.address_line1,
            MIN_ADDRESS_LINE,
            "Address line 1 is required",
        ),
        (&address.city, MIN_CITY, "City is required"),
        (&address.state, MIN_STATE, "State is required"),
        (
            &address.postal_code,
            MIN_POSTAL_CODE,
            "Postal code is required",
        ),
        (&address.country, MIN_COUNTRY, "Country is required"),
        (&address.phone, MIN_PHONE, "Valid phone number is required"),
    ];

    for (value, min_len, message) in checks {
        if value.trim().chars().count() < min_len {
            errors.push(message.to_string());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Priya Sharma".to_string(),
            address_line1: "14 Marine Drive".to_string(),
            address_line2: None,
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            postal_code: "400020".to_string(),
            country: "India".to_string(),
            phone: "+918812345678".to_string(),
        }
    }

    #[test]
    fn complete_address_passes() {
        assert_eq!(validate(&complete_address()), Ok(()));
    }

    #[test]
    fn address_line2_is_optional() {
        let address = ShippingAddress {
            address_line2: Some("Flat 3B".to_string()),
            ..complete_address()
        };

        assert_eq!(validate(&address), Ok(()));
    }

    #[test]
    fn all_failing_fields_are_reported_in_one_pass() {
        // Name passes (2 chars), address line 1 fails (< 5), everything
        // else is missing.
        let address = ShippingAddress {
            full_name: "Jo".to_string(),
            address_line1: "12 St".to_string(),
            ..ShippingAddress::default()
        };

        let errors = validate(&address).unwrap_err();

        assert_eq!(
            errors,
            vec![
                "City is required",
                "State is required",
                "Postal code is required",
                "Country is required",
                "Valid phone number is required",
            ]
        );
    }

    #[test]
    fn whitespace_only_fields_fail() {
        let address = ShippingAddress {
            city: "   ".to_string(),
            ..complete_address()
        };

        assert_eq!(validate(&address), Err(vec!["City is required".to_string()]));
    }

    #[test]
    fn short_phone_fails() {
        let address = ShippingAddress {
            phone: "12345".to_string(),
            ..complete_address()
        };

        assert_eq!(
            validate(&address),
            Err(vec!["Valid phone number is required".to_string()])
        );
    }
}
