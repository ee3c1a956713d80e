//! UDP socket loop.
//!
//! A single task owns the socket and the [`MessageHandler`]:
//! - `recv_from` one datagram,
//! - hand it to the handler,
//! - send each reply to `reply_to` if configured, else back to the sender.
//!
//! Send failures are logged and the loop keeps going.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::handler::MessageHandler;

pub struct UdpGateway {
    socket: UdpSocket,
    reply_to: Option<SocketAddr>,
    handler: MessageHandler,
    recv_buffer_size: usize,
}

impl UdpGateway {
    /// Bind the socket and resolve the reply address.
    pub async fn bind(config: &Config) -> Result<Self> {
        let addr = config.transport.socket_addr_string();
        let socket = UdpSocket::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind UDP socket on {}", addr))?;

        let reply_to = match config.transport.reply_to.as_deref() {
            Some(target) => Some(resolve(target).await?),
            None => None,
        };

        Ok(UdpGateway {
            socket,
            reply_to,
            handler: MessageHandler::new(
                config.gateway.clone(),
                config.transport.max_pending_bytes,
            ),
            recv_buffer_size: config.transport.recv_buffer_size.max(1),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve until `shutdown` completes.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            addr = %self.local_addr()?,
            reply_to = ?self.reply_to,
            "gateway listening"
        );

        tokio::pin!(shutdown);
        let mut buf = vec![0u8; self.recv_buffer_size];

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => {
                    let (len, peer) = match received {
                        Ok(pair) => pair,
                        Err(err) => {
                            // ICMP port-unreachable from an earlier send surfaces here on some platforms.
                            warn!(error = %err, "recv_from failed");
                            continue;
                        }
                    };
                    debug!(%peer, len, "datagram");

                    let dest = self.reply_to.unwrap_or(peer);
                    for reply in self.handler.on_datagram(&buf[..len]) {
                        if let Err(err) = self.socket.send_to(&reply, dest).await {
                            warn!(%dest, error = %err, "send_to failed");
                        }
                    }
                }
            }
        }
    }
}

/// Bind from `config` and serve until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let gateway = UdpGateway::bind(&config).await?;
    gateway
        .run(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
}

async fn resolve(target: &str) -> Result<SocketAddr> {
    lookup_host(target)
        .await
        .with_context(|| format!("Failed to resolve reply_to address {}", target))?
        .next()
        .ok_or_else(|| anyhow!("reply_to address {} resolved to nothing", target))
}
