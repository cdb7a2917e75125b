//! Adobe Sign REST v6 wire types
//!
//! Structs that mirror the subset of the provider's JSON contract this
//! service touches. Field names follow the provider's camelCase.

use serde::{Deserialize, Deserializer, Serialize};

/// Role given to the single participant
pub const ROLE_SIGNER: &str = "SIGNER";

/// Signature type requested for new agreements
pub const SIGNATURE_TYPE_ESIGN: &str = "ESIGN";

/// Error code returned while an agreement is not yet exposed to its signer
pub const AGREEMENT_NOT_EXPOSED: &str = "AGREEMENT_NOT_EXPOSED";

/// Request body for `POST /agreements`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AgreementCreationInfo {
    /// Source documents (one library template)
    pub file_infos: Vec<FileInfo>,
    /// Display name of the agreement
    pub name: String,
    /// Participant sets, one per signing step
    pub participant_sets_info: Vec<ParticipantSetInfo>,
    /// Merge field values filled into the template
    pub merge_field_info: Vec<MergeFieldInfo>,
    /// Signature type, always `ESIGN` here
    pub signature_type: String,
    /// Initial agreement state
    pub state: String,
    /// Where the signer lands after signing
    pub post_sign_redirect_url: String,
}

/// Reference to a library document
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Library (template) document id
    pub library_document_id: String,
}

/// One participant set
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSetInfo {
    /// Members of the set
    pub member_infos: Vec<MemberInfo>,
    /// Signing order, 1-based
    pub order: u32,
    /// Participant role, e.g. `SIGNER`
    pub role: String,
}

/// A single participant
#[derive(Serialize, Debug)]
pub struct MemberInfo {
    /// Participant email
    pub email: String,
}

/// A template merge field value
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MergeFieldInfo {
    /// Field name in the template
    pub field_name: String,
    /// Value placed into the field
    pub default_value: String,
}

/// Response body of `POST /agreements`
#[derive(Deserialize, Debug)]
pub struct AgreementCreationResponse {
    /// Provider-assigned agreement id
    #[serde(default)]
    pub id: Option<String>,
}

/// Request body for `PUT /agreements/{id}/state`
#[derive(Serialize, Debug)]
pub struct AgreementStateInfo {
    /// Target state, e.g. `IN_PROCESS`
    pub state: String,
}

/// Response body of `GET /agreements/{id}/signingUrls`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrlResponse {
    /// One entry per participant set
    #[serde(default, deserialize_with = "nullable_list")]
    pub signing_url_set_infos: Vec<SigningUrlSetInfo>,
}

/// Signing URLs for one participant set
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrlSetInfo {
    /// URLs for the members of the set
    #[serde(default, deserialize_with = "nullable_list")]
    pub signing_urls: Vec<SigningUrl>,
    /// Optional set name
    #[serde(default)]
    pub signing_url_set_name: Option<String>,
}

/// A single-use hosted signing link
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrl {
    /// Participant the URL belongs to
    #[serde(default)]
    pub email: Option<String>,
    /// The hosted signing URL
    #[serde(default)]
    pub esign_url: Option<String>,
}

/// Reads a list the provider may send as `null`, or with `null` entries
///
/// A `null` list becomes empty and a `null` entry becomes `T::default()`,
/// so the caller sees "no URLs" or "empty URL" instead of a parse failure.
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let entries: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Response body of `GET /agreements/{id}`, reduced to what is read
#[derive(Deserialize, Debug)]
pub struct AgreementInfo {
    /// Current lifecycle state
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body returned by the provider
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable detail
    #[serde(default)]
    pub message: Option<String>,
}
