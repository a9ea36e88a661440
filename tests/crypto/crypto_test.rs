#[cfg(test)]
mod tests {
    use crate::utils::canonical_record;
    use ambulance_cds::crypto::{DECRYPTION_ERROR, MISSING_CIPHERTEXT};
    use ambulance_cds::{AesGcmCipher, ComplaintCipher, normalize_record};

    #[test]
    fn test_complaint_survives_storage() {
        let cipher = AesGcmCipher::generate().unwrap();
        let token = cipher.encrypt(Some("shortness of breath")).unwrap();
        assert_ne!(token, "shortness of breath");

        // a record stores the token; the complaint is decrypted before normalizing
        let decrypted = cipher.decrypt(Some(&token));
        let record = canonical_record("1001", 80.0, &decrypted);
        let snapshot = normalize_record(&record).unwrap();
        assert_eq!(snapshot.chief_complaint, "shortness of breath");
    }

    #[test]
    fn test_sentinels() {
        let cipher = AesGcmCipher::generate().unwrap();
        assert_eq!(cipher.encrypt(Some("")), None);
        assert_eq!(cipher.decrypt(None), MISSING_CIPHERTEXT);
        assert_eq!(cipher.decrypt(Some("   ")), MISSING_CIPHERTEXT);
        assert_eq!(cipher.decrypt(Some("garbage-token")), DECRYPTION_ERROR);
    }

    #[test]
    fn test_key_round_trip_through_base64() {
        let cipher = AesGcmCipher::generate().unwrap();
        let token = cipher.encrypt(Some("fall from ladder")).unwrap();
        let restored = AesGcmCipher::from_base64_key(&cipher.key_base64()).unwrap();
        assert_eq!(restored.decrypt(Some(&token)), "fall from ladder");
        assert!(AesGcmCipher::from_base64_key("not a key").is_err());
    }
}
