use pbg_common::Secret;
use peerbill_engine::{
    db_types::NewWallet,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::{WalletStore, WalletStoreError},
    SqliteDatabase,
};

fn new_wallet(address: &str) -> NewWallet {
    NewWallet {
        address: address.into(),
        public_key: "04c0ffee".into(),
        private_key: Secret::new("5eed".to_string()),
        crypto: "ETH".into(),
    }
}

async fn fresh_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

#[tokio::test]
async fn insert_and_fetch_is_case_insensitive() {
    let db = fresh_db().await;
    let saved = db.insert_wallet(new_wallet("0xAbCdEf0000000000000000000000000000000001")).await.unwrap();
    assert_eq!(saved.address, "0xabcdef0000000000000000000000000000000001");
    assert_eq!(saved.crypto, "ETH");

    let fetched = db.fetch_wallet("0xABCDEF0000000000000000000000000000000001").await.unwrap().unwrap();
    assert_eq!(fetched.id, saved.id);
    assert_eq!(fetched.private_key.reveal(), "5eed");
    assert_eq!(fetched.public_key, "04c0ffee");
}

#[tokio::test]
async fn unknown_address_is_none() {
    let db = fresh_db().await;
    let wallet = db.fetch_wallet("0x0000000000000000000000000000000000000009").await.unwrap();
    assert!(wallet.is_none());
}

#[tokio::test]
async fn duplicate_address_is_rejected() {
    let db = fresh_db().await;
    db.insert_wallet(new_wallet("0x00000000000000000000000000000000000000aa")).await.unwrap();
    let mut dup = new_wallet("0x00000000000000000000000000000000000000AA");
    dup.private_key = Secret::new("other".to_string());
    let err = db.insert_wallet(dup).await.unwrap_err();
    assert!(matches!(err, WalletStoreError::AlreadyExists(_)));

    let kept = db.fetch_wallet("0x00000000000000000000000000000000000000aa").await.unwrap().unwrap();
    assert_eq!(kept.private_key.reveal(), "5eed");
    assert_eq!(db.wallet_count().await.unwrap(), 1);
}

#[tokio::test]
async fn saved_wallet_is_visible_to_the_very_next_lookup() {
    let db = fresh_db().await;
    for i in 0..10u8 {
        let address = format!("0x{:040x}", 0xb0 + u32::from(i));
        db.insert_wallet(new_wallet(&address)).await.unwrap();
        let fetched = db.fetch_wallet(&address).await.unwrap();
        assert!(fetched.is_some(), "wallet {address} was not visible straight after insert");
    }
    assert_eq!(db.wallet_count().await.unwrap(), 10);
}
