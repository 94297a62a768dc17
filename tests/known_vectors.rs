use bsv_vanity::crypto::Keypair;

/// (secret key hex, compressed P2PKH address, compressed WIF)
const VECTORS: &[(&str, &str, &str)] = &[
    (
        "0000000000000000000000000000000000000000000000000000000000000001",
        "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
        "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn",
    ),
    (
        "3aba4162c7251c891207b747840551a71939b0de081f85c4e44cf7c13e41daa6",
        "14cxpo3MBCYYWCgF74SWTdcmxipnGUsPw3",
        "KyBsPXxTuVD82av65KZkrGrWi5qLMah5SdNq6uftawDbgKa2wv6S",
    ),
];

#[test]
fn test_private_key_to_address_and_wif() {
    for (priv_hex, expected_addr, expected_wif) in VECTORS {
        let secret: [u8; 32] = hex::decode(priv_hex).unwrap().try_into().unwrap();
        let keypair = Keypair::from_secret_key(secret).unwrap();

        assert_eq!(
            keypair.address().as_str(),
            *expected_addr,
            "Address mismatch for key {}",
            priv_hex
        );
        assert_eq!(
            keypair.private_key().to_wif(),
            *expected_wif,
            "WIF mismatch for key {}",
            priv_hex
        );
    }
}

#[test]
fn test_curve_order_is_rejected() {
    let order: [u8; 32] =
        hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .unwrap()
            .try_into()
            .unwrap();
    assert!(Keypair::from_secret_key(order).is_err());
}
