use super::error::JoseError;
use super::{b64_decode, b64_encode};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde_json::{Map, Value};

pub mod jwk_param {
    pub const KEY_TYPE: &str = "kty";
    pub const KEY_USE: &str = "use";
    pub const KEY_OPERATIONS: &str = "key_ops";
    pub const ALGORITHM: &str = "alg";
    pub const KEY_ID: &str = "kid";
    pub const X509_URL: &str = "x5u";
    pub const X509_CERTIFICATE_CHAIN: &str = "x5c";
    pub const X509_SHA1_THUMBPRINT: &str = "x5t";
    pub const X509_SHA256_THUMBPRINT: &str = "x5t#S256";
    pub const MODULUS: &str = "n";
    pub const PUBLIC_EXPONENT: &str = "e";
    pub const PRIVATE_EXPONENT: &str = "d";
    pub const PRIME_P: &str = "p";
    pub const PRIME_Q: &str = "q";
    pub const PRIME_EXPONENT_P: &str = "dp";
    pub const PRIME_EXPONENT_Q: &str = "dq";
    pub const CRT_COEFFICIENT: &str = "qi";
    pub const KEYS: &str = "keys";
}

pub const KEY_TYPE_RSA: &str = "RSA";

/// JSON Web Key (RFC 7517) with the RSA parameters of RFC 7518 §6.3.
///
/// Big integers are stored as base64url unsigned big-endian octets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jwk {
    params: Map<String, Value>,
}

impl Jwk {
    pub fn builder() -> JwkBuilder {
        JwkBuilder::default()
    }

    pub fn from_params(params: Map<String, Value>) -> Self {
        Self { params }
    }

    pub fn from_json(json: &str) -> Result<Self, JoseError> {
        match serde_json::from_str(json)? {
            Value::Object(params) => Ok(Self { params }),
            _ => Err(JoseError::InvalidKey("JWK must be a JSON object".into())),
        }
    }

    pub fn to_json(&self) -> Result<String, JoseError> {
        Ok(serde_json::to_string(&self.params)?)
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.params)
    }

    /// Public JWK for `key`.
    pub fn from_rsa_public_key(key: &RsaPublicKey) -> Self {
        Self::builder()
            .key_type(KEY_TYPE_RSA)
            .modulus(key.n())
            .public_exponent(key.e())
            .build()
    }

    /// Private JWK for `key`. The CRT parameters are written only when the
    /// key carries them and has exactly two primes.
    pub fn from_rsa_private_key(key: &RsaPrivateKey) -> Self {
        let mut builder = Self::builder()
            .key_type(KEY_TYPE_RSA)
            .modulus(key.n())
            .public_exponent(key.e())
            .private_exponent(key.d());

        if let [p, q] = key.primes() {
            builder = builder.prime_p(p).prime_q(q);
            if let (Some(dp), Some(dq), Some(qinv)) = (key.dp(), key.dq(), key.qinv()) {
                let (_, qi) = qinv.to_bytes_be();
                builder = builder
                    .prime_exponent_p(dp)
                    .prime_exponent_q(dq)
                    .param(jwk_param::CRT_COEFFICIENT, b64_encode(qi));
            }
        }
        builder.build()
    }

    pub fn to_rsa_public_key(&self) -> Result<RsaPublicKey, JoseError> {
        self.require_rsa()?;
        let n = self.big_uint(jwk_param::MODULUS)?;
        let e = self.big_uint(jwk_param::PUBLIC_EXPONENT)?;
        RsaPublicKey::new(n, e).map_err(|err| JoseError::InvalidKey(err.to_string()))
    }

    /// Private key from `n`, `e`, `d`, `p` and `q`. The CRT values are
    /// recomputed rather than read.
    pub fn to_rsa_private_key(&self) -> Result<RsaPrivateKey, JoseError> {
        self.require_rsa()?;
        let n = self.big_uint(jwk_param::MODULUS)?;
        let e = self.big_uint(jwk_param::PUBLIC_EXPONENT)?;
        let d = self.big_uint(jwk_param::PRIVATE_EXPONENT)?;
        let primes = vec![
            self.big_uint(jwk_param::PRIME_P)?,
            self.big_uint(jwk_param::PRIME_Q)?,
        ];

        let key = RsaPrivateKey::from_components(n, e, d, primes)
            .map_err(|err| JoseError::InvalidKey(err.to_string()))?;
        key.validate()
            .map_err(|err| JoseError::InvalidKey(err.to_string()))?;
        Ok(key)
    }

    pub fn is_private(&self) -> bool {
        self.params.contains_key(jwk_param::PRIVATE_EXPONENT)
    }

    pub fn key_type(&self) -> Option<&str> {
        self.get_str(jwk_param::KEY_TYPE)
    }

    pub fn key_use(&self) -> Option<&str> {
        self.get_str(jwk_param::KEY_USE)
    }

    pub fn key_operations(&self) -> Vec<String> {
        self.values(jwk_param::KEY_OPERATIONS)
    }

    pub fn algorithm(&self) -> Option<&str> {
        self.get_str(jwk_param::ALGORITHM)
    }

    pub fn key_id(&self) -> Option<&str> {
        self.get_str(jwk_param::KEY_ID)
    }

    pub fn x509_url(&self) -> Option<&str> {
        self.get_str(jwk_param::X509_URL)
    }

    pub fn x509_certificate_chain(&self) -> Vec<String> {
        self.values(jwk_param::X509_CERTIFICATE_CHAIN)
    }

    pub fn x509_sha1_thumbprint(&self) -> Option<&str> {
        self.get_str(jwk_param::X509_SHA1_THUMBPRINT)
    }

    pub fn x509_sha256_thumbprint(&self) -> Option<&str> {
        self.get_str(jwk_param::X509_SHA256_THUMBPRINT)
    }

    pub fn modulus(&self) -> Option<&str> {
        self.get_str(jwk_param::MODULUS)
    }

    pub fn public_exponent(&self) -> Option<&str> {
        self.get_str(jwk_param::PUBLIC_EXPONENT)
    }

    pub fn private_exponent(&self) -> Option<&str> {
        self.get_str(jwk_param::PRIVATE_EXPONENT)
    }

    pub fn prime_p(&self) -> Option<&str> {
        self.get_str(jwk_param::PRIME_P)
    }

    pub fn prime_q(&self) -> Option<&str> {
        self.get_str(jwk_param::PRIME_Q)
    }

    pub fn prime_exponent_p(&self) -> Option<&str> {
        self.get_str(jwk_param::PRIME_EXPONENT_P)
    }

    pub fn prime_exponent_q(&self) -> Option<&str> {
        self.get_str(jwk_param::PRIME_EXPONENT_Q)
    }

    pub fn crt_coefficient(&self) -> Option<&str> {
        self.get_str(jwk_param::CRT_COEFFICIENT)
    }

    fn require_rsa(&self) -> Result<(), JoseError> {
        match self.key_type() {
            Some(KEY_TYPE_RSA) => Ok(()),
            Some(other) => Err(JoseError::InvalidKey(format!(
                "expected kty RSA, got {other}"
            ))),
            None => Err(JoseError::InvalidKey("missing kty".into())),
        }
    }

    fn big_uint(&self, name: &str) -> Result<BigUint, JoseError> {
        let encoded = self
            .get_str(name)
            .ok_or_else(|| JoseError::InvalidKey(format!("missing RSA parameter {name}")))?;
        let bytes = b64_decode(encoded)?;
        if bytes.is_empty() {
            return Err(JoseError::InvalidKey(format!("empty RSA parameter {name}")));
        }
        Ok(BigUint::from_bytes_be(&bytes))
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    fn values(&self, name: &str) -> Vec<String> {
        match self.params.get(name) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(Value::String(value)) => vec![value.clone()],
            _ => Vec::new(),
        }
    }
}

/// Builds a [`Jwk`]; parameters are written in call order.
#[derive(Debug, Clone, Default)]
pub struct JwkBuilder {
    params: Map<String, Value>,
}

impl JwkBuilder {
    pub fn key_type(self, kty: impl Into<String>) -> Self {
        self.param(jwk_param::KEY_TYPE, kty.into())
    }

    pub fn key_use(self, key_use: impl Into<String>) -> Self {
        self.param(jwk_param::KEY_USE, key_use.into())
    }

    pub fn key_operations<I, S>(self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param(jwk_param::KEY_OPERATIONS, string_array(operations))
    }

    pub fn algorithm(self, alg: impl Into<String>) -> Self {
        self.param(jwk_param::ALGORITHM, alg.into())
    }

    pub fn key_id(self, kid: impl Into<String>) -> Self {
        self.param(jwk_param::KEY_ID, kid.into())
    }

    pub fn x509_url(self, x5u: impl Into<String>) -> Self {
        self.param(jwk_param::X509_URL, x5u.into())
    }

    pub fn x509_certificate_chain<I, S>(self, certificates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param(jwk_param::X509_CERTIFICATE_CHAIN, string_array(certificates))
    }

    pub fn x509_sha1_thumbprint(self, x5t: impl Into<String>) -> Self {
        self.param(jwk_param::X509_SHA1_THUMBPRINT, x5t.into())
    }

    pub fn x509_sha256_thumbprint(self, x5t_s256: impl Into<String>) -> Self {
        self.param(jwk_param::X509_SHA256_THUMBPRINT, x5t_s256.into())
    }

    pub fn modulus(self, n: &BigUint) -> Self {
        self.big_uint(jwk_param::MODULUS, n)
    }

    pub fn public_exponent(self, e: &BigUint) -> Self {
        self.big_uint(jwk_param::PUBLIC_EXPONENT, e)
    }

    pub fn private_exponent(self, d: &BigUint) -> Self {
        self.big_uint(jwk_param::PRIVATE_EXPONENT, d)
    }

    pub fn prime_p(self, p: &BigUint) -> Self {
        self.big_uint(jwk_param::PRIME_P, p)
    }

    pub fn prime_q(self, q: &BigUint) -> Self {
        self.big_uint(jwk_param::PRIME_Q, q)
    }

    pub fn prime_exponent_p(self, dp: &BigUint) -> Self {
        self.big_uint(jwk_param::PRIME_EXPONENT_P, dp)
    }

    pub fn prime_exponent_q(self, dq: &BigUint) -> Self {
        self.big_uint(jwk_param::PRIME_EXPONENT_Q, dq)
    }

    pub fn crt_coefficient(self, qi: &BigUint) -> Self {
        self.big_uint(jwk_param::CRT_COEFFICIENT, qi)
    }

    pub fn param<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Jwk {
        Jwk {
            params: self.params,
        }
    }

    fn big_uint(self, name: &str, value: &BigUint) -> Self {
        self.param(name, b64_encode(value.to_bytes_be()))
    }
}

/// JWK Set (RFC 7517 §5).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JwkSet {
    keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    pub fn from_json(json: &str) -> Result<Self, JoseError> {
        let value: Value = serde_json::from_str(json)?;
        let keys = value
            .get(jwk_param::KEYS)
            .ok_or_else(|| JoseError::InvalidKey("JWK set has no keys member".into()))?;
        Ok(Self {
            keys: jwks_from_value(keys),
        })
    }

    pub fn to_json(&self) -> Result<String, JoseError> {
        let keys: Vec<Value> = self.keys.iter().cloned().map(Jwk::into_value).collect();
        let mut set = Map::new();
        set.insert(jwk_param::KEYS.to_owned(), Value::Array(keys));
        Ok(serde_json::to_string(&set)?)
    }

    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    /// First key whose `kid` equals `kid`.
    pub fn get(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.key_id() == Some(kid))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Keys held by an array of JWK objects or a single JWK object. Non-object
/// entries are skipped.
pub(crate) fn jwks_from_value(value: &Value) -> Vec<Jwk> {
    match value {
        Value::Array(values) => values
            .iter()
            .filter_map(Value::as_object)
            .cloned()
            .map(Jwk::from_params)
            .collect(),
        Value::Object(params) => vec![Jwk::from_params(params.clone())],
        _ => Vec::new(),
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
#[path = "jwk_test.rs"]
mod jwk_test;
