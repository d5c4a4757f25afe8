use num_bigint::BigUint;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize};

pub fn to_hex<S>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(bytes).serialize(s)
}

pub fn from_hex<'de, D>(de: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let hex_str = String::deserialize(de)?;
    hex::decode(hex_str).map_err(|e| serde::de::Error::custom(format!("Invalid hex string: {e}")))
}

pub fn array_to_hex<S>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(bytes).serialize(s)
}

pub fn array_from_hex<'de, D>(de: D) -> Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    let hex_str = String::deserialize(de)?;
    let mut result = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut result)
        .map_err(|e| serde::de::Error::custom(format!("Invalid hex string: {e}")))?;
    Ok(result)
}

/// Serialize a list of 32-byte digests as a list of hex strings.
pub fn digests_to_hex<S>(digests: &[[u8; 32]], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut seq = s.serialize_seq(Some(digests.len()))?;
    for d in digests {
        seq.serialize_element(&hex::encode(d))?;
    }
    seq.end()
}

pub fn digests_from_hex<'de, D>(de: D) -> Result<Vec<[u8; 32]>, D::Error>
where
    D: Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(de)?;
    strings
        .iter()
        .map(|hex_str| {
            let mut result = [0u8; 32];
            hex::decode_to_slice(hex_str, &mut result)
                .map_err(|e| serde::de::Error::custom(format!("Invalid hex digest: {e}")))?;
            Ok(result)
        })
        .collect()
}

/// Serialize a big integer as a BIG-endian hex string.
pub fn biguint_to_hex<S>(value: &BigUint, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    value.to_str_radix(16).serialize(s)
}

pub fn biguint_from_hex<'de, D>(de: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let hex_str = String::deserialize(de)?;
    BigUint::parse_bytes(hex_str.as_bytes(), 16)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid big integer hex string: {hex_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Sample {
        #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
        bytes: Vec<u8>,
        #[serde(serialize_with = "digests_to_hex", deserialize_with = "digests_from_hex")]
        digests: Vec<[u8; 32]>,
        #[serde(serialize_with = "biguint_to_hex", deserialize_with = "biguint_from_hex")]
        value: BigUint,
    }

    #[test]
    fn hex_fields_survive_json() {
        let sample =
            Sample { bytes: vec![0xde, 0xad, 0xbe, 0xef], digests: vec![[7u8; 32]], value: BigUint::from(0xabcdu32) };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"deadbeef\""));
        assert!(json.contains("\"abcd\""));
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn bad_hex_is_rejected() {
        let json = r#"{"bytes":"zz","digests":[],"value":"1"}"#;
        assert!(serde_json::from_str::<Sample>(json).is_err());
        let json = r#"{"bytes":"00","digests":["00"],"value":"1"}"#;
        assert!(serde_json::from_str::<Sample>(json).is_err());
    }
}
