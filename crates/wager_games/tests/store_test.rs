//! Tests for JSON persistence and the service layer over it.

use tempfile::TempDir;
use wager_games::{
    AccountService, GameKind, JsonStore, LedgerConfig, MatchIndex, MatchResult, Store, Tier,
};

fn open(dir: &TempDir) -> AccountService {
    AccountService::open(
        Box::new(JsonStore::new(dir.path())),
        LedgerConfig::default(),
    )
    .expect("Failed to open service")
}

fn play(service: &mut AccountService, wager: u32, result: MatchResult) {
    let mut record = service
        .open_match("alice", "bob", wager, GameKind::Ranked)
        .expect("Failed to open match");
    record.resolve(result, 7);
    service.record_match(&record).expect("Failed to record match");
}

#[test]
fn test_missing_files_load_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path().join("not_yet_created"));
    assert!(store.load_accounts().unwrap().is_empty());
    assert!(store.load_history().unwrap().is_empty());
}

#[test]
fn test_empty_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("accounts.json"), "  \n").unwrap();
    let store = JsonStore::new(dir.path());
    assert!(store.load_accounts().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("history.json"), "{ not json").unwrap();
    let store = JsonStore::new(dir.path());
    let err = store.load_history().unwrap_err();
    assert!(err.message.contains("history.json"));
}

#[test]
fn test_accounts_and_ratings_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir);
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Premium).unwrap();
        play(&mut service, 10, MatchResult::Win);
    }

    let service = open(&dir);
    let alice = service.account("alice").unwrap();
    let bob = service.account("bob").unwrap();
    assert_eq!(*alice.rating(), 110);
    assert_eq!(*bob.rating(), 95);
    assert_eq!(*bob.tier(), Tier::Premium);
    assert_eq!(alice.history(), &vec![MatchIndex::from(0)]);

    let history = service.history("bob");
    assert_eq!(history.len(), 1);
    assert_eq!(*history[0].result(), MatchResult::Win);
    assert_eq!(*history[0].moves(), 7);
    assert!(history[0].played_at().is_some());
}

#[test]
fn test_match_index_resumes_after_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir);
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Basic).unwrap();
        play(&mut service, 1, MatchResult::Draw);
        play(&mut service, 1, MatchResult::Draw);
    }

    let mut service = open(&dir);
    assert_eq!(service.ledger().next_index(), MatchIndex::from(2));
    let record = service
        .open_match("alice", "bob", 1, GameKind::Ranked)
        .unwrap();
    assert_eq!(*record.index(), MatchIndex::from(2));
}

#[test]
fn test_unsettled_match_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir);
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Basic).unwrap();
        service
            .open_match("alice", "bob", 10, GameKind::Ranked)
            .unwrap();
    }

    let service = open(&dir);
    assert!(service.ledger().history().is_empty());
    assert_eq!(*service.account("alice").unwrap().rating(), 100);
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir);
    service.create_account("alice", Tier::Basic).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_clear_data_empties_files() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir);
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Basic).unwrap();
        play(&mut service, 10, MatchResult::Lose);
        service.clear_data().unwrap();
    }

    let service = open(&dir);
    assert!(service.list_accounts().is_empty());
    assert!(service.ledger().history().is_empty());
    assert_eq!(service.ledger().next_index(), MatchIndex::from(0));
}
