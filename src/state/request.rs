//! Instance request model, field extraction and local validation

use crate::error::ValidationError;
use crate::state::forms::RequestForm;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Field identifiers shared by the form and the request payload
pub mod fields {
    pub const REQUESTER_EMAIL: &str = "requesterEmail";
    pub const APPROVER_EMAIL: &str = "approverEmail";
    pub const INSTANCE_NAME: &str = "instanceName";
    pub const INSTANCE_TYPE: &str = "instanceType";
    pub const EBS_VOLUME_SIZE: &str = "ebsVolumeSize";
    pub const EBS_VOLUME_TYPE: &str = "ebsVolumeType";
    pub const PRIVATE_IP_ADDRESS: &str = "privateIpAddress";
    pub const SUBNET_ID: &str = "subnetId";
    pub const SECURITY_GROUP_IDS: &str = "securityGroupIds";
    pub const AMI_ID: &str = "amiId";
}

/// EC2 instance types offered by the form
///
/// Serialized as the labels from [`InstanceType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceType {
    T2Micro,
    T2Small,
    T2Medium,
    #[default]
    T3Micro,
    T3Small,
    T3Medium,
    T3Large,
    T3Xlarge,
    M5Large,
    M5Xlarge,
    C5Large,
    R5Large,
}

impl InstanceType {
    pub const ALL: [InstanceType; 12] = [
        Self::T2Micro,
        Self::T2Small,
        Self::T2Medium,
        Self::T3Micro,
        Self::T3Small,
        Self::T3Medium,
        Self::T3Large,
        Self::T3Xlarge,
        Self::M5Large,
        Self::M5Xlarge,
        Self::C5Large,
        Self::R5Large,
    ];

    const LABELS: [&'static str; 12] = {
        let mut labels = [""; 12];
        let mut i = 0;
        while i < labels.len() {
            labels[i] = Self::ALL[i].as_str();
            i += 1;
        }
        labels
    };

    /// Option labels for the select list, in `ALL` order
    pub const OPTIONS: &'static [&'static str] = &Self::LABELS;

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::T2Micro => "t2.micro",
            Self::T2Small => "t2.small",
            Self::T2Medium => "t2.medium",
            Self::T3Micro => "t3.micro",
            Self::T3Small => "t3.small",
            Self::T3Medium => "t3.medium",
            Self::T3Large => "t3.large",
            Self::T3Xlarge => "t3.xlarge",
            Self::M5Large => "m5.large",
            Self::M5Xlarge => "m5.xlarge",
            Self::C5Large => "c5.large",
            Self::R5Large => "r5.large",
        }
    }

    /// Index of this type in the select list
    pub fn option_index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

impl Serialize for InstanceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownInstanceType(s.to_string()))
    }
}

/// Payload sent to the request endpoint, one per submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRequest {
    pub requester_email: String,
    pub approver_email: String,
    pub instance_name: String,
    pub instance_type: InstanceType,
    pub ebs_volume_size: Option<i64>,
    pub ebs_volume_type: Option<String>,
    pub private_ip_address: Option<String>,
    pub subnet_id: String,
    pub security_group_ids: Vec<String>,
    pub ami_id: Option<String>,
}

impl InstanceRequest {
    /// Extract and normalize the form values into a request.
    ///
    /// Strings are trimmed, blank optional fields become `None`, and the
    /// security group list is split on commas with empty entries dropped.
    /// No constraints are checked here; see [`InstanceRequest::validate`].
    pub fn extract(form: &RequestForm) -> Result<Self, ValidationError> {
        Ok(Self {
            requester_email: form.raw(fields::REQUESTER_EMAIL).trim().to_string(),
            approver_email: form.raw(fields::APPROVER_EMAIL).trim().to_string(),
            instance_name: form.raw(fields::INSTANCE_NAME).trim().to_string(),
            instance_type: form.raw(fields::INSTANCE_TYPE).parse()?,
            ebs_volume_size: parse_volume_size(form.raw(fields::EBS_VOLUME_SIZE).trim())?,
            ebs_volume_type: non_blank(form.raw(fields::EBS_VOLUME_TYPE)),
            private_ip_address: non_blank(form.raw(fields::PRIVATE_IP_ADDRESS)),
            subnet_id: form.raw(fields::SUBNET_ID).trim().to_string(),
            security_group_ids: split_security_groups(form.raw(fields::SECURITY_GROUP_IDS)),
            ami_id: non_blank(form.raw(fields::AMI_ID)),
        })
    }

    /// Check the local constraints that must hold before any network call
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.security_group_ids.is_empty() {
            return Err(ValidationError::MissingSecurityGroups);
        }

        if let Some(ip) = &self.private_ip_address {
            if !is_valid_ipv4(ip) {
                return Err(ValidationError::InvalidIpAddress(ip.clone()));
            }
        }

        Ok(())
    }

    /// Extract and validate in one step
    pub fn from_form(form: &RequestForm) -> Result<Self, ValidationError> {
        let request = Self::extract(form)?;
        request.validate()?;
        Ok(request)
    }
}

/// Dotted-quad check: four octets, each one to three digits valued 0-255.
///
/// Leading zeros are accepted as long as the octet stays within three digits
/// (`"010.001.000.099"` passes, `"0255.0.0.1"` does not).
pub fn is_valid_ipv4(candidate: &str) -> bool {
    let octets: Vec<&str> = candidate.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| is_valid_octet(o))
}

fn is_valid_octet(octet: &str) -> bool {
    (1..=3).contains(&octet.len())
        && octet.bytes().all(|b| b.is_ascii_digit())
        && octet.parse::<u16>().is_ok_and(|v| v <= 255)
}

/// Parse an optional sign followed by leading decimal digits, ignoring the rest.
/// Returns `Ok(None)` when there are no leading digits and `Err(())` when the
/// digits do not fit in an `i64`.
fn parse_leading_int(input: &str) -> Result<Option<i64>, ()> {
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return Ok(None);
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    parsed.map(Some).map_err(|_| ())
}

fn parse_volume_size(input: &str) -> Result<Option<i64>, ValidationError> {
    parse_leading_int(input)
        .map_err(|()| ValidationError::VolumeSizeOutOfRange(input.to_string()))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_security_groups(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn filled_form() -> RequestForm {
        let mut form = RequestForm::new();
        form.set(fields::REQUESTER_EMAIL, "  dev@example.com ");
        form.set(fields::APPROVER_EMAIL, "lead@example.com");
        form.set(fields::INSTANCE_NAME, " build-box ");
        form.set(fields::SUBNET_ID, "subnet-0abc ");
        form.set(fields::SECURITY_GROUP_IDS, "sg-1, sg-2");
        form
    }

    #[test]
    fn test_ipv4_accepts_dotted_quads() {
        assert!(is_valid_ipv4("10.0.0.5"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(is_valid_ipv4("192.168.1.254"));
    }

    #[test]
    fn test_ipv4_rejects_malformed() {
        assert!(!is_valid_ipv4("10.0.0.256"));
        assert!(!is_valid_ipv4("10.0.0"));
        assert!(!is_valid_ipv4("10.0.0.5.6"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("10.0..5"));
        assert!(!is_valid_ipv4("10.0.0.-1"));
        assert!(!is_valid_ipv4("10.0.0.+1"));
        assert!(!is_valid_ipv4("a.b.c.d"));
        assert!(!is_valid_ipv4("300.1.1.1"));
        assert!(!is_valid_ipv4(" 10.0.0.5"));
    }

    #[test]
    fn test_ipv4_leading_zeros_within_three_digits() {
        assert!(is_valid_ipv4("010.001.000.099"));
        assert!(is_valid_ipv4("00.0.0.1"));
        assert!(!is_valid_ipv4("0255.0.0.1"));
        assert!(!is_valid_ipv4("00255.0.0.1"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("20"), Ok(Some(20)));
        assert_eq!(parse_leading_int("20GB"), Ok(Some(20)));
        assert_eq!(parse_leading_int("-5"), Ok(Some(-5)));
        assert_eq!(parse_leading_int("+8"), Ok(Some(8)));
        assert_eq!(parse_leading_int("1.9"), Ok(Some(1)));
        assert_eq!(parse_leading_int("abc"), Ok(None));
        assert_eq!(parse_leading_int("-"), Ok(None));
        assert_eq!(parse_leading_int(""), Ok(None));
        assert_eq!(parse_leading_int("-9223372036854775808"), Ok(Some(i64::MIN)));
        assert_eq!(parse_leading_int("99999999999999999999"), Err(()));
    }

    #[test]
    fn test_oversized_volume_is_rejected() {
        let mut form = filled_form();
        form.set(fields::EBS_VOLUME_SIZE, " 99999999999999999999GB ");
        assert_eq!(
            InstanceRequest::from_form(&form),
            Err(ValidationError::VolumeSizeOutOfRange(
                "99999999999999999999GB".to_string()
            ))
        );
    }

    #[test]
    fn test_split_security_groups() {
        assert_eq!(
            split_security_groups(" sg-1 ,, sg-2,  ,sg-3 "),
            vec!["sg-1", "sg-2", "sg-3"]
        );
        assert!(split_security_groups(" , , ").is_empty());
        assert!(split_security_groups("").is_empty());
    }

    #[test]
    fn test_extract_normalizes_fields() {
        let mut form = filled_form();
        form.set(fields::EBS_VOLUME_SIZE, " 30 ");
        form.set(fields::EBS_VOLUME_TYPE, " gp3 ");
        form.set(fields::PRIVATE_IP_ADDRESS, " 10.0.0.5 ");
        form.set(fields::AMI_ID, "   ");

        let request = InstanceRequest::extract(&form).unwrap();
        assert_eq!(
            request,
            InstanceRequest {
                requester_email: "dev@example.com".to_string(),
                approver_email: "lead@example.com".to_string(),
                instance_name: "build-box".to_string(),
                instance_type: InstanceType::T3Micro,
                ebs_volume_size: Some(30),
                ebs_volume_type: Some("gp3".to_string()),
                private_ip_address: Some("10.0.0.5".to_string()),
                subnet_id: "subnet-0abc".to_string(),
                security_group_ids: vec!["sg-1".to_string(), "sg-2".to_string()],
                ami_id: None,
            }
        );
    }

    #[test]
    fn test_validate_requires_security_group() {
        let mut form = filled_form();
        form.set(fields::SECURITY_GROUP_IDS, " , ");
        assert_eq!(
            InstanceRequest::from_form(&form),
            Err(ValidationError::MissingSecurityGroups)
        );
    }

    #[test]
    fn test_validate_rejects_bad_ip() {
        let mut form = filled_form();
        form.set(fields::PRIVATE_IP_ADDRESS, "10.0.0.256");
        assert_eq!(
            InstanceRequest::from_form(&form),
            Err(ValidationError::InvalidIpAddress("10.0.0.256".to_string()))
        );
    }

    #[test]
    fn test_validate_security_groups_checked_before_ip() {
        let mut form = filled_form();
        form.set(fields::SECURITY_GROUP_IDS, "");
        form.set(fields::PRIVATE_IP_ADDRESS, "nope");
        assert_eq!(
            InstanceRequest::from_form(&form),
            Err(ValidationError::MissingSecurityGroups)
        );
    }

    #[test]
    fn test_blank_ip_is_absent_and_valid() {
        let mut form = filled_form();
        form.set(fields::PRIVATE_IP_ADDRESS, "   ");
        let request = InstanceRequest::from_form(&form).unwrap();
        assert!(request.private_ip_address.is_none());
    }

    #[test]
    fn test_serializes_wire_names_with_nulls() {
        let request = InstanceRequest::extract(&filled_form()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "requesterEmail": "dev@example.com",
                "approverEmail": "lead@example.com",
                "instanceName": "build-box",
                "instanceType": "t3.micro",
                "ebsVolumeSize": null,
                "ebsVolumeType": null,
                "privateIpAddress": null,
                "subnetId": "subnet-0abc",
                "securityGroupIds": ["sg-1", "sg-2"],
                "amiId": null
            })
        );
    }

    #[test]
    fn test_instance_type_round_trips_through_options() {
        for (ty, label) in InstanceType::ALL.iter().zip(InstanceType::OPTIONS) {
            assert_eq!(ty.as_str(), *label);
            assert_eq!(label.parse::<InstanceType>().unwrap(), *ty);
            assert_eq!(InstanceType::OPTIONS[ty.option_index()], *label);
        }
        assert!("t9.huge".parse::<InstanceType>().is_err());
    }

    #[test]
    fn test_instance_type_serde_uses_labels() {
        assert_eq!(serde_json::to_value(InstanceType::M5Xlarge).unwrap(), json!("m5.xlarge"));
        let parsed: InstanceType = serde_json::from_value(json!("r5.large")).unwrap();
        assert_eq!(parsed, InstanceType::R5Large);
        assert!(serde_json::from_value::<InstanceType>(json!("t9.huge")).is_err());
    }
}
