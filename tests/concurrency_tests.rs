//! Stress tests for concurrent tag writes, snapshot reads and ticks

use journal_server::assets::Assets;
use journal_server::demo::{run_host, DemoHost};
use journal_server::error::RosterError;
use journal_server::network::{router, NetworkServer};
use journal_server::publisher::{run_publisher, Publisher};
use journal_server::roster::{Participant, RoleDescriptor, RosterSource, Session};
use journal_server::state::Journal;
use journal_shared::{GameStateSnapshot, Rgba, TagRequest};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Full lobby where everyone stays alive
struct FullLobby;

impl RosterSource for FullLobby {
    fn poll_roster(&self) -> Result<Option<Session>, RosterError> {
        let participants = (0..15u8)
            .map(|id| Participant::new(id, format!("P{}", id), Rgba::new(id, 0, 0, 255), "Red"))
            .collect();
        Ok(Some(Session::new(participants)))
    }

    fn poll_roles(&self) -> Result<Vec<RoleDescriptor>, RosterError> {
        Ok(vec![RoleDescriptor::new("Crewmate", 0)])
    }
}

/// Many writers and readers against the publisher directly
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tags_and_reads_never_tear() {
    let publisher = Arc::new(Publisher::new(Arc::new(FullLobby), Journal::shared()));
    publisher.tick().await;

    let mut handles = Vec::new();

    for writer in 0..8u8 {
        let publisher = Arc::clone(&publisher);
        handles.push(tokio::spawn(async move {
            for i in 0..200u32 {
                let id = (writer + i as u8) % 15;
                let tag = if i % 7 == 0 {
                    "Clear".to_string()
                } else {
                    format!("w{} \"quoted\" \\ {}", writer, i)
                };
                publisher.apply_tag(&TagRequest::new(id, tag)).await;
            }
        }));
    }

    {
        let publisher = Arc::clone(&publisher);
        handles.push(tokio::spawn(async move {
            for _ in 0..500 {
                publisher.tick().await;
            }
        }));
    }

    for _ in 0..8 {
        let publisher = Arc::clone(&publisher);
        handles.push(tokio::spawn(async move {
            for _ in 0..500 {
                let raw = publisher.snapshot().await;
                let snapshot: GameStateSnapshot =
                    serde_json::from_str(&raw).expect("torn snapshot");
                assert_eq!(snapshot.players.len(), 15);
                assert!(snapshot
                    .players
                    .iter()
                    .all(|p| p.note.as_deref() != Some("Clear")));
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // Note book and published snapshot agree after the dust settles
    publisher.tick().await;
    let snapshot: GameStateSnapshot = serde_json::from_str(&publisher.snapshot().await).unwrap();
    let journal = publisher.state().read().await;
    for player in &snapshot.players {
        assert_eq!(player.note.as_deref(), journal.notes.get(player.id));
    }
}

async fn raw_request(addr: std::net::SocketAddr, request: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    String::from_utf8(raw).unwrap()
}

/// Simultaneous HTTP clients while the simulated host runs at full speed
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn http_clients_during_live_host() {
    let host = Arc::new(DemoHost::new(10, Some(99)));
    let publisher = Arc::new(Publisher::new(host.clone(), Journal::shared()));

    let (tick_tx, tick_rx) = mpsc::channel(64);
    tokio::spawn(run_host(host, 1000, tick_tx));
    tokio::spawn(run_publisher(Arc::clone(&publisher), tick_rx));

    let app = router(Arc::clone(&publisher), Assets::fallback());
    let server = NetworkServer::bind("127.0.0.1:0", app).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let start = Instant::now();
    let mut handles = Vec::new();

    for client in 0..16u8 {
        handles.push(tokio::spawn(async move {
            for i in 0..20u8 {
                let request = if (client + i) % 2 == 0 {
                    "GET /api/gamestate HTTP/1.1\r\nHost: x\r\nConnection: close\r\n\r\n".to_string()
                } else {
                    let body = format!(r#"{{"playerId":{},"tag":"c{}"}}"#, i % 10, client);
                    format!(
                        "POST /api/tagplayer HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };

                let raw = raw_request(addr, request.clone()).await;
                let (head, body) = raw.split_once("\r\n\r\n").unwrap();
                assert!(head.starts_with("HTTP/1.1 200"), "unexpected: {}", head);

                if request.starts_with("GET") {
                    let snapshot: Result<GameStateSnapshot, _> = serde_json::from_str(body);
                    assert!(snapshot.is_ok(), "invalid snapshot: {}", body);
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let duration = start.elapsed();
    println!("320 requests against a live host in {:?}", duration);
    assert!(publisher.ticks() > 0);
}

/// Builder pass cost for a full lobby
#[test]
fn benchmark_tick() {
    let publisher = Publisher::new(Arc::new(FullLobby), Journal::shared());
    let iterations = 2_000;
    let start = Instant::now();

    tokio_test::block_on(async {
        for _ in 0..iterations {
            publisher.tick().await;
        }
    });

    let duration = start.elapsed();
    println!(
        "Tick: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Well under one host frame per tick
    assert!(duration.as_millis() < 5000);
}
