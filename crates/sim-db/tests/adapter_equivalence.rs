//! Holds both adapters to one observable contract.
//!
//! Every test runs the same operation sequence against [`MemoryStore`] and a
//! `:memory:` [`LibsqlStore`] and asserts the same visible outcome. Ids and
//! audit stamps are store-assigned and excluded from the comparisons.

use chrono::{DateTime, Duration, TimeZone, Utc};

use sim_core::entities::UserPreferences;
use sim_core::enums::{SimulationStatus, ThemeMode};
use sim_core::locale::LanguageCode;
use sim_core::requests::{NewProject, NewSimulationEntry};
use sim_core::search::{HistoryFilters, Pagination, SearchResult};
use sim_db::ports::{ProjectRepository, SimulationHistoryRepository, UserPreferencesRepository};
use sim_db::{LibsqlStore, MemoryStore, StoreError};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

fn draft(path: &str, status: SimulationStatus, timestamp: DateTime<Utc>) -> NewSimulationEntry {
    NewSimulationEntry {
        project_path: path.to_string(),
        project_name: path.rsplit('/').next().unwrap_or(path).to_string(),
        status,
        ttk_version: "2.1.0".to_string(),
        config_json: "{}".to_string(),
        summary_json: "{}".to_string(),
        report_file_path: None,
        duration_ms: None,
        battle_count: None,
        trecho_count: None,
        timestamp,
    }
}

/// 25 drafts, strictly decreasing timestamps, alternating completed/pending
/// starting from completed. Distinct timestamps keep the ordering fully
/// determined without relying on id tie-breaks, which differ per adapter.
fn alternating(newest: DateTime<Utc>) -> Vec<NewSimulationEntry> {
    (0..25)
        .map(|i| {
            let status = if i % 2 == 0 {
                SimulationStatus::Completed
            } else {
                SimulationStatus::Pending
            };
            draft("/sims/alpha", status, newest - Duration::minutes(i))
        })
        .collect()
}

async fn libsql_store() -> LibsqlStore {
    LibsqlStore::open_local(":memory:").await.unwrap()
}

async fn seed(repo: &dyn SimulationHistoryRepository, drafts: &[NewSimulationEntry]) {
    for d in drafts {
        repo.insert(d.clone()).await.unwrap();
    }
}

/// Id-free projection of a result page for cross-adapter equality.
#[allow(clippy::type_complexity)]
fn page_shape(
    result: &SearchResult,
) -> (u64, u32, u32, u32, Vec<(String, SimulationStatus, DateTime<Utc>)>) {
    (
        result.total,
        result.page,
        result.per_page,
        result.last_page,
        result
            .items
            .iter()
            .map(|e| (e.project_path.clone(), e.status, e.timestamp))
            .collect(),
    )
}

#[tokio::test]
async fn search_pages_identically_across_adapters() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let mem_repo: &dyn SimulationHistoryRepository = &mem;
    let sql_repo: &dyn SimulationHistoryRepository = &sql;

    let drafts = alternating(noon());
    seed(mem_repo, &drafts).await;
    seed(sql_repo, &drafts).await;

    let completed = HistoryFilters {
        status: Some(SimulationStatus::Completed),
        ..Default::default()
    };
    let cases = vec![
        (HistoryFilters::default(), Pagination { page: 1, per_page: 10 }),
        (completed.clone(), Pagination { page: 1, per_page: 10 }),
        (completed.clone(), Pagination { page: 2, per_page: 10 }),
        // Past the last page: empty items, metadata intact.
        (completed, Pagination { page: 9, per_page: 10 }),
        (
            HistoryFilters {
                project_path: Some("ALPHA".to_string()),
                ..Default::default()
            },
            Pagination { page: 1, per_page: 25 },
        ),
        (
            HistoryFilters {
                date_from: Some(noon() - Duration::minutes(5)),
                date_to: Some(noon()),
                ..Default::default()
            },
            Pagination { page: 1, per_page: 10 },
        ),
        // Inverted window: naturally empty, not an error.
        (
            HistoryFilters {
                date_from: Some(noon()),
                date_to: Some(noon() - Duration::days(1)),
                ..Default::default()
            },
            Pagination { page: 1, per_page: 10 },
        ),
        (
            HistoryFilters {
                ttk_version: Some("9.9.9".to_string()),
                ..Default::default()
            },
            Pagination { page: 1, per_page: 10 },
        ),
    ];

    for (filters, page) in cases {
        let mem_page = mem_repo.search(&filters, page).await.unwrap();
        let sql_page = sql_repo.search(&filters, page).await.unwrap();
        assert_eq!(
            page_shape(&mem_page),
            page_shape(&sql_page),
            "adapters diverged on filters {filters:?} page {page:?}"
        );
    }
}

#[tokio::test]
async fn concatenated_pages_reproduce_the_full_match_sequence() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let repos: [&dyn SimulationHistoryRepository; 2] = [&mem, &sql];

    for repo in repos {
        seed(repo, &alternating(noon())).await;
        let full = repo
            .search(&HistoryFilters::default(), Pagination { page: 1, per_page: 25 })
            .await
            .unwrap();
        assert_eq!(full.items.len(), 25);

        // Page size 7 does not divide 25, so the tail page is partial.
        let mut concatenated = Vec::new();
        let mut page_no = 1;
        loop {
            let page = repo
                .search(&HistoryFilters::default(), Pagination { page: page_no, per_page: 7 })
                .await
                .unwrap();
            if page_no > page.last_page {
                assert!(page.items.is_empty());
                break;
            }
            concatenated.extend(page.items);
            page_no += 1;
        }
        assert_eq!(concatenated, full.items);
    }
}

#[tokio::test]
async fn report_flag_lifecycle_matches() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let repos: [&dyn SimulationHistoryRepository; 2] = [&mem, &sql];

    for repo in repos {
        let mut with_report = draft("/sims/alpha", SimulationStatus::Completed, noon());
        with_report.report_file_path = Some("/reports/alpha.html".to_string());
        let entry = repo.insert(with_report).await.unwrap();
        assert!(entry.has_report);

        // Clearing the flag on update drops the path everywhere.
        let mut stale = entry.clone();
        stale.has_report = false;
        repo.update(&stale).await.unwrap();
        let fetched = repo.find_by_id(&entry.id).await.unwrap().unwrap();
        assert!(!fetched.has_report);
        assert_eq!(fetched.report_file_path, None);

        // An empty path never sets the flag.
        let mut empty_path = draft("/sims/beta", SimulationStatus::Completed, noon());
        empty_path.report_file_path = Some(String::new());
        let entry = repo.insert(empty_path).await.unwrap();
        assert!(!entry.has_report);
        assert_eq!(entry.report_file_path, None);
    }
}

#[tokio::test]
async fn absence_is_data_in_both_adapters() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let repos: [&dyn SimulationHistoryRepository; 2] = [&mem, &sql];

    for repo in repos {
        assert_eq!(repo.find_by_id("sim-ffffffff").await.unwrap(), None);
        assert!(!repo.exists("sim-ffffffff").await.unwrap());

        // Deleting what is not there is a no-op, not a fault.
        repo.delete("sim-ffffffff").await.unwrap();
        assert_eq!(repo.find_by_id("sim-ffffffff").await.unwrap(), None);

        // Updating what is not there is the one absence that fails.
        let entry = repo
            .insert(draft("/sims/alpha", SimulationStatus::Pending, noon()))
            .await
            .unwrap();
        let mut ghost = entry;
        ghost.id = "sim-ffffffff".to_string();
        assert!(matches!(
            repo.update(&ghost).await,
            Err(StoreError::RowNotFound { .. })
        ));
    }
}

#[tokio::test]
async fn project_contract_matches() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let repos: [&dyn ProjectRepository; 2] = [&mem, &sql];

    for repo in repos {
        let project = repo
            .insert(NewProject {
                name: "alpha".to_string(),
                path: "/sims/alpha".to_string(),
            })
            .await
            .unwrap();

        // Path existence is exact, not substring or case-folded.
        assert!(repo.exists_by_path("/sims/alpha").await.unwrap());
        assert!(!repo.exists_by_path("/sims/Alpha").await.unwrap());
        assert!(!repo.exists_by_path("/sims/alph").await.unwrap());

        let dup = repo
            .insert(NewProject {
                name: "other".to_string(),
                path: "/sims/alpha".to_string(),
            })
            .await;
        assert!(dup.is_err(), "duplicate path must be rejected");

        repo.insert(NewProject {
            name: "zeta".to_string(),
            path: "/sims/zeta".to_string(),
        })
        .await
        .unwrap();
        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);

        repo.delete(&project.id).await.unwrap();
        repo.delete(&project.id).await.unwrap();
        assert_eq!(repo.find_by_id(&project.id).await.unwrap(), None);
    }
}

#[tokio::test]
async fn preferences_contract_matches() {
    let mem = MemoryStore::new();
    let sql = libsql_store().await;
    let repos: [&dyn UserPreferencesRepository; 2] = [&mem, &sql];

    for repo in repos {
        let draft = UserPreferences {
            user_id: "user-1".to_string(),
            language: LanguageCode::parse("pt-BR").unwrap(),
            theme: ThemeMode::Dark,
            created_at: noon(),
            updated_at: noon(),
        };
        let stored = repo.insert(&draft).await.unwrap();
        // Audit instants come from the store, not the draft.
        assert_ne!(stored.created_at, noon());

        assert!(repo.insert(&draft).await.is_err(), "user id is a key");

        let mut next = stored.clone();
        next.language = LanguageCode::parse("en").unwrap();
        next.theme = ThemeMode::System;
        repo.update(&next).await.unwrap();

        let fetched = repo.find_by_user_id("user-1").await.unwrap().unwrap();
        assert_eq!(fetched.language.as_str(), "en");
        assert_eq!(fetched.theme, ThemeMode::System);
        assert_eq!(fetched.created_at, stored.created_at);

        repo.delete("user-1").await.unwrap();
        repo.delete("user-1").await.unwrap();
        assert_eq!(repo.find_by_user_id("user-1").await.unwrap(), None);
        assert!(matches!(
            repo.update(&next).await,
            Err(StoreError::RowNotFound { .. })
        ));
    }
}
