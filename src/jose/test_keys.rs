use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};

pub(crate) static RECIPIENT: Lazy<RsaPrivateKey> = Lazy::new(generate);
pub(crate) static STRANGER: Lazy<RsaPrivateKey> = Lazy::new(generate);

fn generate() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut OsRng, 2048).expect("generate RSA key")
}

pub(crate) fn recipient_public() -> RsaPublicKey {
    RsaPublicKey::from(&*RECIPIENT)
}
