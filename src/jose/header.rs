use super::algorithm::{CompressionAlgorithm, ContentEncryption, KeyManagementAlgorithm};
use super::error::JoseError;
use super::jwk::{Jwk, jwks_from_value};
use super::{b64_decode, b64_encode};
use serde_json::{Map, Value};

pub mod param {
    pub const ALGORITHM: &str = "alg";
    pub const ENCRYPTION: &str = "enc";
    pub const CEK_BIT_LENGTH: &str = "cek_bitlength";
    pub const COMPRESSION: &str = "zip";
    pub const KEY_ID: &str = "kid";
    pub const TYPE: &str = "typ";
    pub const CONTENT_TYPE: &str = "cty";
    pub const JWK_SET_URL: &str = "jku";
    pub const KEYS: &str = "keys";
    pub const JWK: &str = "jwk";
    pub const X509_URL: &str = "x5u";
    pub const X509_CERTIFICATE_CHAIN: &str = "x5c";
    pub const X509_SHA1_THUMBPRINT: &str = "x5t";
    pub const X509_SHA256_THUMBPRINT: &str = "x5t#S256";
    pub const CRITICAL: &str = "crit";
    pub const PARTY_U_INFO: &str = "epu";
    pub const PARTY_V_INFO: &str = "epv";
}

/// JOSE header of a JWE.
///
/// Parameters keep their insertion order, which fixes the exact bytes of
/// the encoded header and therefore the AAD.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JweHeader {
    params: Map<String, Value>,
}

impl JweHeader {
    pub fn builder() -> JweHeaderBuilder {
        JweHeaderBuilder::default()
    }

    pub fn from_params(params: Map<String, Value>) -> Self {
        Self { params }
    }

    pub fn from_json(json: &str) -> Result<Self, JoseError> {
        match serde_json::from_str(json)? {
            Value::Object(params) => Ok(Self { params }),
            _ => Err(JoseError::InvalidHeader(
                "header must be a JSON object".into(),
            )),
        }
    }

    pub fn to_json(&self) -> Result<String, JoseError> {
        Ok(serde_json::to_string(&self.params)?)
    }

    /// Base64url encoding of the header JSON, as used in the compact form.
    pub fn encode(&self) -> Result<String, JoseError> {
        Ok(b64_encode(self.to_json()?))
    }

    pub fn decode(encoded: &str) -> Result<Self, JoseError> {
        let bytes = b64_decode(encoded)?;
        let json = String::from_utf8(bytes)
            .map_err(|_| JoseError::InvalidHeader("header is not UTF-8".into()))?;
        Self::from_json(&json)
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn algorithm(&self) -> Result<KeyManagementAlgorithm, JoseError> {
        self.required_str(param::ALGORITHM)?.parse()
    }

    pub fn encryption(&self) -> Result<ContentEncryption, JoseError> {
        self.required_str(param::ENCRYPTION)?.parse()
    }

    pub fn compression(&self) -> Result<Option<CompressionAlgorithm>, JoseError> {
        self.get_str(param::COMPRESSION)
            .map(str::parse::<CompressionAlgorithm>)
            .transpose()
    }

    pub fn cek_bitlength(&self) -> Result<Option<u64>, JoseError> {
        let bits = match self.params.get(param::CEK_BIT_LENGTH) {
            None => return Ok(None),
            Some(Value::Number(bits)) => bits.as_u64(),
            Some(Value::String(bits)) => bits.parse().ok(),
            Some(_) => None,
        };

        bits.map(Some).ok_or_else(|| {
            JoseError::InvalidHeader(format!(
                "{} must be a positive integer",
                param::CEK_BIT_LENGTH
            ))
        })
    }

    /// CEK length in bytes for this header's `enc` and `cek_bitlength`.
    pub fn cek_length(&self) -> Result<usize, JoseError> {
        self.encryption()?.cek_length(self.cek_bitlength()?)
    }

    pub fn key_id(&self) -> Option<&str> {
        self.get_str(param::KEY_ID)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get_str(param::CONTENT_TYPE)
    }

    pub fn media_type(&self) -> Option<&str> {
        self.get_str(param::TYPE)
    }

    pub fn jwk_set_url(&self) -> Option<&str> {
        self.get_str(param::JWK_SET_URL)
    }

    /// Keys listed under `keys`, or the single `jwk` when `keys` is absent.
    pub fn keys(&self) -> Vec<Jwk> {
        self.params
            .get(param::KEYS)
            .or_else(|| self.params.get(param::JWK))
            .map(jwks_from_value)
            .unwrap_or_default()
    }

    pub fn x509_url(&self) -> Option<&str> {
        self.get_str(param::X509_URL)
    }

    pub fn x509_certificate_chain(&self) -> Vec<String> {
        self.header_values(param::X509_CERTIFICATE_CHAIN)
    }

    pub fn x509_sha1_thumbprint(&self) -> Option<&str> {
        self.get_str(param::X509_SHA1_THUMBPRINT)
    }

    pub fn x509_sha256_thumbprint(&self) -> Option<&str> {
        self.get_str(param::X509_SHA256_THUMBPRINT)
    }

    pub fn critical(&self) -> Vec<String> {
        self.header_values(param::CRITICAL)
    }

    pub fn party_u_info(&self) -> Option<&str> {
        self.get_str(param::PARTY_U_INFO)
    }

    pub fn party_v_info(&self) -> Option<&str> {
        self.get_str(param::PARTY_V_INFO)
    }

    /// Renders a parameter as text. Arrays yield their first element;
    /// objects and nulls yield nothing.
    pub fn header(&self, name: &str) -> Option<String> {
        match self.params.get(name)? {
            Value::Array(values) => values.first().and_then(render_scalar),
            value => render_scalar(value),
        }
    }

    /// Renders every element of an array parameter, or the single value of
    /// a scalar one.
    pub fn header_values(&self, name: &str) -> Vec<String> {
        match self.params.get(name) {
            Some(Value::Array(values)) => values.iter().filter_map(render_scalar).collect(),
            Some(value) => render_scalar(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    fn required_str(&self, name: &'static str) -> Result<&str, JoseError> {
        self.get_str(name).ok_or(JoseError::MissingHeader(name))
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Builds a [`JweHeader`]; parameters are written in call order.
#[derive(Debug, Clone, Default)]
pub struct JweHeaderBuilder {
    params: Map<String, Value>,
}

impl JweHeaderBuilder {
    pub fn algorithm(self, alg: KeyManagementAlgorithm) -> Self {
        self.param(param::ALGORITHM, alg.name())
    }

    pub fn encryption(self, enc: ContentEncryption) -> Self {
        self.param(param::ENCRYPTION, enc.name())
    }

    pub fn cek_bitlength(self, bits: u64) -> Self {
        self.param(param::CEK_BIT_LENGTH, bits)
    }

    pub fn compression(self, zip: CompressionAlgorithm) -> Self {
        self.param(param::COMPRESSION, zip.name())
    }

    pub fn key_id(self, kid: impl Into<String>) -> Self {
        self.param(param::KEY_ID, kid.into())
    }

    pub fn media_type(self, typ: impl Into<String>) -> Self {
        self.param(param::TYPE, typ.into())
    }

    pub fn content_type(self, cty: impl Into<String>) -> Self {
        self.param(param::CONTENT_TYPE, cty.into())
    }

    pub fn jwk_set_url(self, jku: impl Into<String>) -> Self {
        self.param(param::JWK_SET_URL, jku.into())
    }

    /// Public keys the content was encrypted to.
    pub fn keys<I>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = Jwk>,
    {
        let keys = keys.into_iter().map(Jwk::into_value).collect();
        self.param(param::KEYS, Value::Array(keys))
    }

    pub fn jwk(self, key: Jwk) -> Self {
        self.param(param::JWK, key.into_value())
    }

    pub fn x509_url(self, x5u: impl Into<String>) -> Self {
        self.param(param::X509_URL, x5u.into())
    }

    pub fn x509_certificate_chain<I, S>(self, certificates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param(param::X509_CERTIFICATE_CHAIN, string_array(certificates))
    }

    pub fn x509_sha1_thumbprint(self, x5t: impl Into<String>) -> Self {
        self.param(param::X509_SHA1_THUMBPRINT, x5t.into())
    }

    pub fn x509_sha256_thumbprint(self, x5t_s256: impl Into<String>) -> Self {
        self.param(param::X509_SHA256_THUMBPRINT, x5t_s256.into())
    }

    pub fn critical<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param(param::CRITICAL, string_array(names))
    }

    /// Agreement PartyUInfo, base64url encoded.
    pub fn party_u_info(self, epu: impl Into<String>) -> Self {
        self.param(param::PARTY_U_INFO, epu.into())
    }

    /// Agreement PartyVInfo, base64url encoded.
    pub fn party_v_info(self, epv: impl Into<String>) -> Self {
        self.param(param::PARTY_V_INFO, epv.into())
    }

    /// Sets an arbitrary parameter, replacing any previous value in place.
    pub fn param<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> JweHeader {
        JweHeader {
            params: self.params,
        }
    }
}

fn string_array<I, S>(values: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(values.into_iter().map(|value| Value::String(value.into())).collect())
}

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;
