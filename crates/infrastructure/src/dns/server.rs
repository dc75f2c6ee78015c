use super::authority::{AuthoritativeResolver, Resolution};
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Header, Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use nexns_domain::DnsRequest;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Classic DNS-over-UDP payload ceiling without EDNS.
pub const DEFAULT_UDP_PAYLOAD_LIMIT: usize = 512;

/// Wire-level front of the authoritative engine.
///
/// UDP datagrams go through [`DnsServerHandler::handle_udp`] (bytes in,
/// bytes out). TCP is served by hickory's `ServerFuture` through the
/// [`RequestHandler`] impl.
#[derive(Clone)]
pub struct DnsServerHandler {
    resolver: Arc<AuthoritativeResolver>,
    udp_payload_limit: usize,
}

impl DnsServerHandler {
    pub fn new(resolver: Arc<AuthoritativeResolver>) -> Self {
        Self {
            resolver,
            udp_payload_limit: DEFAULT_UDP_PAYLOAD_LIMIT,
        }
    }

    pub fn with_udp_payload_limit(mut self, limit: usize) -> Self {
        self.udp_payload_limit = limit.max(DEFAULT_UDP_PAYLOAD_LIMIT);
        self
    }

    /// Answers a datagram; oversized answers come back truncated with TC set.
    pub fn handle_udp(&self, query: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        self.handle(query, client_ip, self.udp_payload_limit)
    }

    /// `None` means the input is not a query we can reply to at all.
    fn handle(&self, query: &[u8], client_ip: IpAddr, max_size: usize) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Dropping unparseable DNS message");
                return None;
            }
        };
        if request.message_type() != MessageType::Query {
            return None;
        }

        let response = self.respond(&request, client_ip);
        let wire = encode(&response)?;
        if wire.len() <= max_size {
            return Some(wire);
        }

        debug!(size = wire.len(), limit = max_size, "Response truncated");
        encode(&truncated(&request, &response))
    }

    fn respond(&self, request: &Message, client_ip: IpAddr) -> Message {
        let mut response = reply_to(request);

        if request.op_code() != OpCode::Query {
            response.set_response_code(ResponseCode::NotImp);
            return response;
        }
        let Some(question) = request.queries().first() else {
            response.set_response_code(ResponseCode::FormErr);
            return response;
        };
        response.add_query(question.clone());

        let verdict = self.answer(&question.name().to_ascii(), question.query_type(), client_ip);
        response.set_authoritative(verdict.authoritative);
        response.set_response_code(verdict.code);
        response.add_answers(verdict.answers);
        response.add_additionals(verdict.additionals);
        response
    }

    fn answer(&self, name: &str, query_type: HickoryRecordType, client_ip: IpAddr) -> Verdict {
        let record_type = RecordTypeMapper::from_hickory(query_type);
        let dns_request = DnsRequest::new(name, record_type, client_ip);

        debug!(
            domain = %dns_request.name,
            record_type = %dns_request.record_type,
            client = %dns_request.client_ip,
            "DNS query received"
        );

        Verdict::from(self.resolver.resolve(&dns_request))
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.header().op_code() != OpCode::Query {
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        }

        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                debug!(error = %e, "Malformed request");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let client_ip = request.src().ip();
        let verdict = self.answer(&query.name().to_ascii(), query.query_type(), client_ip);

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(verdict.authoritative);
        header.set_response_code(verdict.code);
        let response = builder.build(
            header,
            verdict.answers.iter(),
            &[],
            &[],
            verdict.additionals.iter(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

/// Header flags and sections for one resolution outcome.
struct Verdict {
    code: ResponseCode,
    authoritative: bool,
    answers: Vec<Record>,
    additionals: Vec<Record>,
}

impl From<Resolution> for Verdict {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Answer {
                answers,
                additionals,
            } => Self {
                code: ResponseCode::NoError,
                authoritative: true,
                answers,
                additionals,
            },
            Resolution::Negative => Self {
                code: ResponseCode::NXDomain,
                authoritative: true,
                answers: Vec::new(),
                additionals: Vec::new(),
            },
            // No fallback resolver is chained behind the engine.
            Resolution::PassThrough => Self {
                code: ResponseCode::Refused,
                authoritative: false,
                answers: Vec::new(),
                additionals: Vec::new(),
            },
        }
    }
}

fn reply_to(request: &Message) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(false);
    response
}

/// Header and question only, TC set, same verdict.
fn truncated(request: &Message, full: &Message) -> Message {
    let mut response = reply_to(request);
    response.set_truncated(true);
    response.set_authoritative(full.authoritative());
    response.set_response_code(full.response_code());
    for question in full.queries() {
        response.add_query(question.clone());
    }
    response
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    if let Err(e) = message.emit(&mut encoder) {
        warn!(error = %e, "Failed to serialize DNS response");
        return None;
    }
    Some(buf)
}
