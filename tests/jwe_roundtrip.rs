use once_cell::sync::Lazy;
use picketlink_rs::jose::{
    CompressionAlgorithm, ContentEncryption, JoseError, JweDecrypter, JweEncrypter, JweHeader,
    JweParts, KeyManagementAlgorithm, param,
};
use rand::rngs::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};

static PRIVATE_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation"));

fn encrypter() -> JweEncrypter {
    JweEncrypter::new(RsaPublicKey::from(&*PRIVATE_KEY))
}

fn decrypter() -> JweDecrypter {
    JweDecrypter::new(PRIVATE_KEY.clone())
}

const CLAIMS: &str = r#"{"iss":"https://idp.example.com","sub":"alice","aud":"sp"}"#;

#[test]
fn every_content_encryption_should_round_trip() {
    for enc in ContentEncryption::ALL {
        // Arrange
        let header = JweHeader::builder()
            .algorithm(KeyManagementAlgorithm::RsaOaep256)
            .encryption(enc)
            .build();

        // Act
        let compact = encrypter()
            .encrypt(&header, CLAIMS.as_bytes())
            .expect("encrypt");
        let plaintext = decrypter().decrypt(&compact).expect("decrypt");

        // Assert
        assert_eq!(plaintext, CLAIMS.as_bytes(), "{enc}");
    }
}

#[test]
fn header_from_json_should_survive_transport() {
    // Arrange
    let header = JweHeader::from_json(
        r#"{"alg":"RSA1_5","enc":"A256GCM","zip":"DEF","kid":"2024-signing","typ":"JWT","x5c":["MIIB","MIIC"]}"#,
    )
    .expect("valid header");

    // Act
    let compact = encrypter()
        .encrypt(&header, CLAIMS.as_bytes())
        .expect("encrypt");
    let received = JweParts::parse(&compact)
        .and_then(|parts| parts.header())
        .expect("header");

    // Assert
    assert_eq!(received.algorithm().ok(), Some(KeyManagementAlgorithm::Rsa1_5));
    assert_eq!(received.encryption().ok(), Some(ContentEncryption::A256Gcm));
    assert_eq!(
        received.compression().ok().flatten(),
        Some(CompressionAlgorithm::Deflate)
    );
    assert_eq!(received.key_id(), Some("2024-signing"));
    assert_eq!(received.media_type(), Some("JWT"));
    assert_eq!(received.header_values(param::X509_CERTIFICATE_CHAIN), vec!["MIIB", "MIIC"]);
    assert_eq!(
        decrypter().decrypt(&compact).expect("decrypt"),
        CLAIMS.as_bytes()
    );
}

#[test]
fn compact_form_should_parse_and_print_identically() {
    // Arrange
    let header = JweHeader::builder()
        .algorithm(KeyManagementAlgorithm::RsaOaep)
        .encryption(ContentEncryption::A128CbcHs256)
        .build();
    let compact = encrypter()
        .encrypt(&header, CLAIMS.as_bytes())
        .expect("encrypt");

    // Act
    let parts: JweParts = compact.parse().expect("compact");

    // Assert
    assert_eq!(parts.to_string(), compact);
    assert_eq!(
        decrypter().decrypt_parts(&parts).expect("decrypt"),
        CLAIMS.as_bytes()
    );
}

#[test]
fn token_for_another_recipient_should_not_decrypt() {
    // Arrange
    let other = RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation");
    let header = JweHeader::builder()
        .algorithm(KeyManagementAlgorithm::RsaOaep)
        .encryption(ContentEncryption::A256Gcm)
        .build();
    let compact = JweEncrypter::new(RsaPublicKey::from(&other))
        .encrypt(&header, CLAIMS.as_bytes())
        .expect("encrypt");

    // Act
    let result = decrypter().decrypt(&compact);

    // Assert
    assert!(matches!(result, Err(JoseError::KeyUnwrap(_))));
}

#[test]
fn empty_payload_should_round_trip() {
    // Arrange
    let header = JweHeader::builder()
        .algorithm(KeyManagementAlgorithm::RsaOaep)
        .encryption(ContentEncryption::A192CbcHs384)
        .compression(CompressionAlgorithm::Deflate)
        .build();

    // Act
    let compact = encrypter().encrypt(&header, b"").expect("encrypt");

    // Assert
    assert_eq!(decrypter().decrypt(&compact).expect("decrypt"), b"");
}
