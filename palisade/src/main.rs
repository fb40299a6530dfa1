//! The `palisade` server binary: parses `--port`, binds a TCP listener, and
//! drives each accepted connection through the handshake/login/play
//! dispatcher chain.
//!
//! Accept-loop shape grounded on `steel::SteelServer::new`/`start`
//! (`examples/tn-lorenz-SteelMC/steel/src/lib.rs`), including its
//! `tokio::select!` race between a shutdown signal and the next accept
//! (there, a `CancellationToken`; here, `tokio::signal::ctrl_c`, since
//! nothing else in this core needs a cancellation token); logging init on
//! `windymindy-innkeeper`'s `tracing_subscriber::fmt()` call in its
//! `#[tokio::main]`.

use std::sync::Arc;

use palisade_login::{
    DispatcherChain, EntityIdAllocator, HandshakeHandler, LoginHandler, MojangIdentityClient,
    PlayHandler, Session,
};

const DEFAULT_PORT: u16 = 25565;

fn parse_port() -> u16 {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--port" {
            if let Some(value) = args.next() {
                match value.parse() {
                    Ok(port) => return port,
                    Err(e) => {
                        eprintln!("invalid --port value {value:?}: {e}");
                        std::process::exit(1);
                    }
                }
            }
            eprintln!("--port requires a value");
            std::process::exit(1);
        }
    }
    DEFAULT_PORT
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let port = parse_port();
    let addr = ("0.0.0.0", port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind 0.0.0.0:{port}: {e}");
            std::process::exit(1);
        }
    };
    log::info!("listening on 0.0.0.0:{port}");

    let entity_ids = Arc::new(EntityIdAllocator::new());
    let (handoff_tx, mut handoff_rx) = palisade_login::handoff::channel();

    let chain = Arc::new(DispatcherChain::new(vec![
        Box::new(HandshakeHandler),
        Box::new(LoginHandler::new(
            Arc::new(MojangIdentityClient),
            Arc::clone(&entity_ids),
            handoff_tx,
        )),
        Box::new(PlayHandler),
    ]));

    // The hand-off receiver just logs arrivals: gameplay past "join game" is
    // out of scope, so there is nothing further in this core to hand the
    // session to.
    tokio::spawn(async move {
        while let Some(message) = handoff_rx.recv().await {
            log::info!(
                "{} joined as {:?} (entity id {})",
                message.session.peer_addr(),
                message.player_name,
                message.entity_id
            );
        }
    });

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutdown signal received, stopping accept loop");
                break;
            }
            accept_result = listener.accept() => {
                let (conn, addr) = match accept_result {
                    Ok(pair) => pair,
                    Err(e) => {
                        log::warn!("accept failed: {e}");
                        continue;
                    }
                };
                if let Err(e) = conn.set_nodelay(true) {
                    log::warn!("failed to set TCP_NODELAY for {addr}: {e}");
                }

                let (session, read_half) = Session::new(conn);
                log::info!("accepted connection from {addr}");

                tokio::spawn(Arc::clone(&session).run_reader(read_half));
                tokio::spawn(session.run_dispatch_loop(Arc::clone(&chain)));
            }
        }
    }
}
