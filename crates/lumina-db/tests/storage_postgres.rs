//! PostgreSQL integration tests using testcontainers.
//!
//! Run with: cargo test -p lumina_db --features postgres-tests --test storage_postgres
//!
//! Each test starts its own PostgreSQL container, applies the embedded
//! migrations and drives the diesel models through the pool.

use std::time::Duration;

use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use lumina_db::models::{
    Chain, DexInfo, DexProtocol, NewChain, NewProtocol, NewYieldPool, OverviewInfoRecord,
    OverviewProtocolRecord, OverviewSnapshot, Protocol, YieldPool,
};
use lumina_db::schema::{dex_infos, dex_protocols};
use lumina_db::{LuminaPool, init_pool, run_migrations};
use rust_decimal::dec;
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt,
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
};

/// Start PostgreSQL container.
///
/// Returns (container, connection_string); the container stops when dropped.
async fn start_postgres() -> (ContainerAsync<GenericImage>, String) {
    let image = GenericImage::new("postgres", "16")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    let container = image
        .with_env_var("POSTGRES_USER", "lumina")
        .with_env_var("POSTGRES_PASSWORD", "lumina")
        .with_env_var("POSTGRES_DB", "lumina")
        .with_startup_timeout(Duration::from_secs(60))
        .start()
        .await
        .expect("Failed to start postgres container");

    let host_port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get mapped port");
    let host = container
        .get_host()
        .await
        .expect("Failed to get container host");

    let connection_string = format!("postgres://lumina:lumina@{host}:{host_port}/lumina");
    (container, connection_string)
}

/// Builds the pool once the server accepts TCP connections, then migrates.
async fn connect_and_migrate(connection_string: &str) -> Pool {
    let pool = init_pool("lumina-db-test", connection_string, 2).expect("Failed to build pool");

    // The init-time server the image starts first only listens on a socket.
    let mut attempts = 0;
    while pool.get().await.is_err() {
        attempts += 1;
        assert!(attempts < 60, "PostgreSQL never accepted connections");
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

fn chain(name: &str, tvl: rust_decimal::Decimal) -> NewChain {
    NewChain {
        name: name.to_string(),
        gecko_id: None,
        tvl,
        token_symbol: None,
        cmc_id: None,
        chain_id: None,
    }
}

fn dex_snapshot(chain: &str, protocols: Vec<OverviewProtocolRecord>) -> OverviewSnapshot {
    OverviewSnapshot {
        chain: Some(chain.to_string()),
        info: OverviewInfoRecord {
            total_24h: Some(dec!(1000)),
            ..Default::default()
        },
        protocols,
    }
}

fn dex_protocol(
    defillama_id: &str,
    total_24h: Option<rust_decimal::Decimal>,
) -> OverviewProtocolRecord {
    OverviewProtocolRecord {
        defillama_id: defillama_id.to_string(),
        name: format!("protocol {defillama_id}"),
        total_24h,
        ..Default::default()
    }
}

fn yield_pool(pool: &str, chain: &str, tvl_usd: Option<rust_decimal::Decimal>) -> NewYieldPool {
    NewYieldPool {
        pool: pool.to_string(),
        chain: chain.to_string(),
        project: "aave-v3".to_string(),
        symbol: "USDC".to_string(),
        tvl_usd,
        apy_base: None,
        apy_reward: None,
        apy: None,
        reward_tokens: None,
        apy_pct_1d: None,
        apy_pct_7d: None,
        apy_pct_30d: None,
        stablecoin: true,
        il_risk: None,
        exposure: None,
        predictions: None,
        pool_meta: None,
        mu: None,
        sigma: None,
        observation_count: None,
        outlier: false,
        underlying_tokens: None,
        il_7d: None,
        apy_base_7d: None,
        apy_mean_30d: None,
        volume_usd_1d: None,
        volume_usd_7d: None,
        apy_base_inception: None,
    }
}

fn count_dex_rows(conn: &mut PgConnection) -> QueryResult<(i64, i64)> {
    let infos = dex_infos::table.count().get_result(conn)?;
    let protocols = dex_protocols::table.count().get_result(conn)?;
    Ok((infos, protocols))
}

#[tokio::test]
async fn test_failed_overview_write_commits_nothing() {
    let (_container, connection_string) = start_postgres().await;
    let pool = connect_and_migrate(&connection_string).await;

    // `category` is VARCHAR(100): the second protocol row fails after the
    // info row and the first protocol row were written.
    let oversized = OverviewProtocolRecord {
        category: Some("x".repeat(101)),
        ..dex_protocol("2", Some(dec!(5)))
    };
    let snapshot = dex_snapshot("Ethereum", vec![dex_protocol("1", Some(dec!(10))), oversized]);

    let result = pool
        .interact_with_context("save failing dex overview".into(), move |conn| {
            Chain::upsert_by_name(&chain("Ethereum", dec!(100)), conn)?;
            Ok::<_, lumina_db::DatabaseError>(DexInfo::save_snapshot(&snapshot, conn))
        })
        .await
        .unwrap();
    assert!(result.is_err());

    let (infos, protocols) = pool
        .interact_with_context("count dex rows".into(), count_dex_rows)
        .await
        .unwrap();
    assert_eq!((infos, protocols), (0, 0));
}

#[tokio::test]
async fn test_overview_for_unknown_chain_is_not_found() {
    let (_container, connection_string) = start_postgres().await;
    let pool = connect_and_migrate(&connection_string).await;

    let err = pool
        .interact_with_context("save dex overview for unknown chain".into(), |conn| {
            DexInfo::save_snapshot(&dex_snapshot("Nowhere", vec![dex_protocol("1", None)]), conn)
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation(), "resolve chain 'Nowhere'");

    let (infos, protocols) = pool
        .interact_with_context("count dex rows".into(), count_dex_rows)
        .await
        .unwrap();
    assert_eq!((infos, protocols), (0, 0));
}

#[tokio::test]
async fn test_overview_round_trip_orders_protocols_by_volume() {
    let (_container, connection_string) = start_postgres().await;
    let pool = connect_and_migrate(&connection_string).await;

    let (info, protocols) = pool
        .interact_with_context("save and load dex overview".into(), |conn| {
            let base = Chain::upsert_by_name(&chain("Base", dec!(50)), conn)?;
            let snapshot = dex_snapshot(
                "Base",
                vec![
                    dex_protocol("low", Some(dec!(1))),
                    dex_protocol("unknown", None),
                    dex_protocol("high", Some(dec!(99))),
                ],
            );
            DexInfo::save_snapshot(&snapshot, conn)?;
            Ok::<_, lumina_db::DatabaseError>(DexInfo::load_with_protocols(
                Some(base.idx),
                10,
                conn,
            )?)
        })
        .await
        .unwrap();

    assert_eq!(info.total_24h, Some(dec!(1000)));
    let ids: Vec<&str> = protocols.iter().map(|p| p.defillama_id.as_str()).collect();
    assert_eq!(ids, vec!["high", "low", "unknown"]);
    assert!(protocols.iter().all(|p: &DexProtocol| p.dex_info_idx == info.idx));
}

#[tokio::test]
async fn test_upsert_overwrites_omitted_fields_with_null() {
    let (_container, connection_string) = start_postgres().await;
    let pool = connect_and_migrate(&connection_string).await;

    let (first, second, rows) = pool
        .interact_with_context("upsert protocol twice".into(), |conn| {
            let full = NewProtocol {
                protocol_id: "2269".to_string(),
                name: "Aave".to_string(),
                symbol: Some("AAVE".to_string()),
                category: Some("Lending".to_string()),
                chains: vec!["Ethereum".to_string()],
                tvl: Some(12.5),
                chain_tvls: serde_json::json!({"Ethereum": 12.5}),
                change_1d: Some(1.0),
                change_7d: None,
            };
            let first = Protocol::upsert_by_protocol_id(&full, conn)?;
            let sparse = NewProtocol {
                symbol: None,
                tvl: None,
                ..full
            };
            let second = Protocol::upsert_by_protocol_id(&sparse, conn)?;
            let rows: i64 = lumina_db::schema::protocols::table.count().get_result(conn)?;
            Ok::<_, lumina_db::DatabaseError>((first, second, rows))
        })
        .await
        .unwrap();

    assert_eq!(rows, 1);
    assert_eq!(second.idx, first.idx);
    assert_eq!(first.symbol.as_deref(), Some("AAVE"));
    assert_eq!(second.symbol, None);
    assert_eq!(second.tvl, None);
    assert_eq!(second.category.as_deref(), Some("Lending"));
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn test_top_queries_order_and_filter() {
    let (_container, connection_string) = start_postgres().await;
    let pool = connect_and_migrate(&connection_string).await;

    let (chains, base_pools, wildcard_pools, underscore_pools) = pool
        .interact_with_context("rank chains and pools".into(), |conn| {
            for new in [
                chain("Base", dec!(100)),
                chain("Ethereum", dec!(500)),
                chain("Zk", dec!(1)),
            ] {
                Chain::upsert_by_name(&new, conn)?;
            }
            for new in [
                yield_pool("p1", "Base", Some(dec!(10))),
                yield_pool("p2", "Base", None),
                yield_pool("p3", "Base", Some(dec!(30))),
                yield_pool("p4", "Ethereum", Some(dec!(1000))),
            ] {
                YieldPool::upsert_by_pool(&new, conn)?;
            }
            let chains = Chain::find_top_by_tvl(2, conn)?;
            let base = YieldPool::find_top_by_tvl(Some("base"), 10, conn)?;
            let wildcard = YieldPool::find_top_by_tvl(Some("%"), 10, conn)?;
            let underscore = YieldPool::find_top_by_tvl(Some("B_se"), 10, conn)?;
            Ok::<_, lumina_db::DatabaseError>((chains, base, wildcard, underscore))
        })
        .await
        .unwrap();

    let names: Vec<&str> = chains.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ethereum", "Base"]);

    let pools: Vec<&str> = base_pools.iter().map(|p| p.pool.as_str()).collect();
    assert_eq!(pools, vec!["p3", "p1", "p2"]);

    assert!(wildcard_pools.is_empty());
    assert!(underscore_pools.is_empty());
}
