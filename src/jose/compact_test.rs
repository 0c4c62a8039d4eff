use super::*;

mod parse {
    use super::*;

    #[test]
    fn should_split_five_segments() {
        // Arrange
        let compact = "eyJhIjoxfQ.AQ.Ag.Aw.BA";

        // Act
        let parts = JweParts::parse(compact).expect("five segments");

        // Assert
        assert_eq!(parts.encoded_header(), "eyJhIjoxfQ");
        assert_eq!(parts.encrypted_key().ok(), Some(vec![1]));
        assert_eq!(parts.iv().ok(), Some(vec![2]));
        assert_eq!(parts.ciphertext().ok(), Some(vec![3]));
        assert_eq!(parts.tag().ok(), Some(vec![4]));
        assert_eq!(parts.to_string(), compact);
    }

    #[test]
    fn should_allow_empty_encrypted_key() {
        // Act
        let parts: JweParts = "eyJhIjoxfQ..Ag.Aw.BA".parse().expect("five segments");

        // Assert
        assert_eq!(parts.encrypted_key().ok(), Some(Vec::new()));
    }

    #[test]
    fn should_reject_wrong_segment_count() {
        for compact in ["a.b.c.d", "a.b.c.d.e.f", ""] {
            // Act
            let result = JweParts::parse(compact);

            // Assert
            assert!(
                matches!(result, Err(JoseError::InvalidSerialization(_))),
                "{compact:?} should be rejected"
            );
        }
    }

    #[test]
    fn should_reject_empty_header() {
        // Act
        let result = JweParts::parse(".b.c.d.e");

        // Assert
        assert!(matches!(result, Err(JoseError::InvalidSerialization(_))));
    }
}

mod from_raw {
    use super::*;

    #[test]
    fn should_encode_without_padding() {
        // Arrange & Act
        let parts = JweParts::from_raw("hdr", &[0xff, 0xfe], &[1, 2, 3], &[], &[9]);

        // Assert
        assert_eq!(parts.to_string(), "hdr.__4.AQID..CQ");
        assert_eq!(parts.signing_input(), "hdr.__4.AQID.");
    }
}
