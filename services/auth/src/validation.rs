//! Input validation utilities
//!
//! Checks run by the login, KYC and land screens before calling a remote
//! service. Errors carry the message shown to the user.

use regex::Regex;
use std::sync::OnceLock;

fn digits(value: &str, count: usize) -> bool {
    static DIGITS_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DIGITS_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]+$").expect("Failed to compile digits regex"));

    value.len() == count && regex.is_match(value)
}

/// Validate a mobile number: exactly 10 digits
pub fn validate_mobile_number(mobile: &str) -> Result<(), String> {
    if !digits(mobile, 10) {
        return Err("Please enter a valid 10-digit mobile number".to_string());
    }
    Ok(())
}

/// Validate a one-time code: exactly 6 digits
pub fn validate_otp(otp: &str) -> Result<(), String> {
    if !digits(otp, 6) {
        return Err("Please enter a valid 6-digit OTP".to_string());
    }
    Ok(())
}

/// Validate an Aadhaar number: exactly 12 digits
pub fn validate_aadhaar_number(aadhaar_number: &str) -> Result<(), String> {
    if !digits(aadhaar_number, 12) {
        return Err("Please enter a valid 12-digit Aadhaar number".to_string());
    }
    Ok(())
}

/// Validate the manual land search form
pub fn validate_land_search(
    district: &str,
    tehsil: &str,
    village: &str,
    survey_no: &str,
) -> Result<(), String> {
    let fields = [
        (district, "district name"),
        (tehsil, "tehsil name"),
        (village, "village name"),
        (survey_no, "survey number"),
    ];

    for (value, label) in fields {
        if value.trim().is_empty() {
            return Err(format!("Please enter the {label}."));
        }
    }
    Ok(())
}

/// Validate a land claim selection: at least one parcel
pub fn validate_claim_selection(selected: usize) -> Result<(), String> {
    if selected == 0 {
        return Err("Please select at least one land parcel to claim.".to_string());
    }
    Ok(())
}
