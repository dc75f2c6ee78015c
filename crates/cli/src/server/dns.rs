use hickory_server::ServerFuture;
use nexns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    num_workers: usize,
    tcp_enabled: bool,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(
        bind_address = %socket_addr,
        num_workers,
        tcp_enabled,
        "Starting DNS server with SO_REUSEPORT"
    );

    let handler = Arc::new(handler);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers {
        let udp_socket = create_udp_socket(domain, socket_addr)?;
        let handler_udp = handler.clone();
        let shutdown_udp = shutdown.clone();
        join_set.spawn(async move {
            run_udp_worker(udp_socket, handler_udp, i, shutdown_udp).await;
        });

        if tcp_enabled {
            let tcp_listener = create_tcp_listener(domain, socket_addr)?;
            let handler_tcp = (*handler).clone();
            let shutdown_tcp = shutdown.clone();
            join_set.spawn(async move {
                let mut server = ServerFuture::new(handler_tcp);
                server.register_listener(tcp_listener, TCP_IDLE_TIMEOUT);
                tokio::select! {
                    _ = shutdown_tcp.cancelled() => {}
                    result = server.block_until_done() => {
                        if let Err(e) = result {
                            error!(worker = i, error = %e, "TCP DNS worker error");
                        }
                    }
                }
            });
        }
    }

    info!(num_workers, address = %socket_addr, "DNS server ready");

    while join_set.join_next().await.is_some() {}
    info!("DNS server stopped");
    Ok(())
}

async fn run_udp_worker(
    socket: UdpSocket,
    handler: Arc<DnsServerHandler>,
    worker_id: usize,
    shutdown: CancellationToken,
) {
    let mut recv_buf = [0u8; 4096];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => received,
        };

        let (n, from) = match received {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP port-unreachable from an earlier reply surfaces here on some platforms.
                debug!(worker = worker_id, error = %e, "UDP recv error");
                continue;
            }
        };

        if let Some(response) = handler.handle_udp(&recv_buf[..n], from.ip()) {
            if let Err(e) = socket.send_to(&response, from).await {
                debug!(worker = worker_id, client = %from, error = %e, "UDP send failed");
            }
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
