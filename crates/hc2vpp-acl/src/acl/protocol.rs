//! Protocol-dependent fields of standard ACL rules.
//!
//! The record has one protocol byte, two 16-bit ranges and two flag bytes.
//! For TCP and UDP the ranges are source/destination ports. For ICMP and
//! ICMPv6 the same fields carry the type range (source slot) and the code
//! range (destination slot).

use tracing::{debug, warn};
use vpp_acl_api::types::{proto, MAX_PORT};
use vpp_acl_api::AclRule;

use super::error::{AclError, Result};
use super::types::{IcmpRange, PortRange, ProtocolSpec, TcpFlags};

/// Protocol-dependent part of an [`AclRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolFields {
    pub proto: u8,
    pub srcport_or_icmptype_first: u16,
    pub srcport_or_icmptype_last: u16,
    pub dstport_or_icmpcode_first: u16,
    pub dstport_or_icmpcode_last: u16,
    pub tcp_flags_mask: u8,
    pub tcp_flags_value: u8,
}

impl ProtocolFields {
    /// No protocol constraint: the dataplane ignores every L4 field.
    pub const ANY: Self = Self {
        proto: proto::ANY,
        srcport_or_icmptype_first: 0,
        srcport_or_icmptype_last: MAX_PORT,
        dstport_or_icmpcode_first: 0,
        dstport_or_icmpcode_last: MAX_PORT,
        tcp_flags_mask: 0,
        tcp_flags_value: 0,
    };

    /// Copies the fields into a rule record.
    pub fn apply_to(&self, rule: &mut AclRule) {
        rule.proto = self.proto;
        rule.srcport_or_icmptype_first = self.srcport_or_icmptype_first;
        rule.srcport_or_icmptype_last = self.srcport_or_icmptype_last;
        rule.dstport_or_icmpcode_first = self.dstport_or_icmpcode_first;
        rule.dstport_or_icmpcode_last = self.dstport_or_icmpcode_last;
        rule.tcp_flags_mask = self.tcp_flags_mask;
        rule.tcp_flags_value = self.tcp_flags_value;
    }

    fn with_ports(proto: u8, src: Option<&PortRange>, dst: Option<&PortRange>) -> Self {
        let (src_first, src_last) = port_bounds(src);
        let (dst_first, dst_last) = port_bounds(dst);
        Self {
            proto,
            srcport_or_icmptype_first: src_first,
            srcport_or_icmptype_last: src_last,
            dstport_or_icmpcode_first: dst_first,
            dstport_or_icmpcode_last: dst_last,
            tcp_flags_mask: 0,
            tcp_flags_value: 0,
        }
    }

    fn with_icmp(proto: u8, types: Option<&IcmpRange>, codes: Option<&IcmpRange>) -> Self {
        let types = types.copied().unwrap_or(IcmpRange::ALL);
        let codes = codes.copied().unwrap_or(IcmpRange::ALL);
        Self {
            proto,
            srcport_or_icmptype_first: u16::from(types.first),
            srcport_or_icmptype_last: u16::from(types.last),
            dstport_or_icmpcode_first: u16::from(codes.first),
            dstport_or_icmpcode_last: u16::from(codes.last),
            tcp_flags_mask: 0,
            tcp_flags_value: 0,
        }
    }
}

impl Default for ProtocolFields {
    fn default() -> Self {
        Self::ANY
    }
}

/// Missing range matches every port; a missing upper port means a single port.
fn port_bounds(range: Option<&PortRange>) -> (u16, u16) {
    range.map_or((0, MAX_PORT), PortRange::bounds)
}

/// Encodes a protocol constraint into rule fields.
///
/// `None` yields [`ProtocolFields::ANY`]. An absent ICMP type or code range
/// matches every type or code.
///
/// # Errors
///
/// Returns [`AclError::UnsupportedProtocol`] for [`ProtocolSpec::Unknown`].
pub fn encode_protocol(spec: Option<&ProtocolSpec>) -> Result<ProtocolFields> {
    let Some(spec) = spec else {
        return Ok(ProtocolFields::ANY);
    };

    let fields = match spec {
        ProtocolSpec::Icmp {
            type_range,
            code_range,
        } => ProtocolFields::with_icmp(proto::ICMP, type_range.as_ref(), code_range.as_ref()),
        ProtocolSpec::IcmpV6 {
            type_range,
            code_range,
        } => ProtocolFields::with_icmp(proto::ICMPV6, type_range.as_ref(), code_range.as_ref()),
        ProtocolSpec::Tcp {
            source_port,
            destination_port,
            flags_mask,
            flags,
        } => ProtocolFields {
            tcp_flags_mask: flags_mask.map_or(0, |f| f.bits()),
            tcp_flags_value: flags.map_or(0, |f| f.bits()),
            ..ProtocolFields::with_ports(proto::TCP, source_port.as_ref(), destination_port.as_ref())
        },
        ProtocolSpec::Udp {
            source_port,
            destination_port,
        } => ProtocolFields::with_ports(proto::UDP, source_port.as_ref(), destination_port.as_ref()),
        ProtocolSpec::Other { protocol } => {
            if matches!(
                *protocol,
                proto::ICMP | proto::TCP | proto::UDP | proto::ICMPV6
            ) {
                warn!(
                    protocol = *protocol,
                    "Protocol number has its own node, passing it through as other"
                );
            }
            ProtocolFields {
                proto: *protocol,
                ..ProtocolFields::ANY
            }
        }
        ProtocolSpec::Unknown => return Err(AclError::unsupported_protocol(spec.name())),
    };

    debug!(protocol = spec.name(), proto = fields.proto, "Encoded protocol fields");
    Ok(fields)
}

/// Reads a 16-bit ICMP field, saturating values no ICMP header can carry.
fn icmp_value(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn icmp_ranges(rule: &AclRule) -> (Option<IcmpRange>, Option<IcmpRange>) {
    (
        Some(IcmpRange::new(
            icmp_value(rule.srcport_or_icmptype_first),
            icmp_value(rule.srcport_or_icmptype_last),
        )),
        Some(IcmpRange::new(
            icmp_value(rule.dstport_or_icmpcode_first),
            icmp_value(rule.dstport_or_icmpcode_last),
        )),
    )
}

fn port_ranges(rule: &AclRule) -> (Option<PortRange>, Option<PortRange>) {
    (
        Some(PortRange::new(
            rule.srcport_or_icmptype_first,
            rule.srcport_or_icmptype_last,
        )),
        Some(PortRange::new(
            rule.dstport_or_icmpcode_first,
            rule.dstport_or_icmpcode_last,
        )),
    )
}

/// Decodes the protocol constraint of a rule, dispatching on `proto` only.
///
/// Every range is read literally, so defaults written by the encoder come
/// back as explicit full ranges.
pub fn decode_protocol(rule: &AclRule) -> ProtocolSpec {
    match rule.proto {
        proto::ICMP => {
            let (type_range, code_range) = icmp_ranges(rule);
            ProtocolSpec::Icmp {
                type_range,
                code_range,
            }
        }
        proto::ICMPV6 => {
            let (type_range, code_range) = icmp_ranges(rule);
            ProtocolSpec::IcmpV6 {
                type_range,
                code_range,
            }
        }
        proto::TCP => {
            let (source_port, destination_port) = port_ranges(rule);
            ProtocolSpec::Tcp {
                source_port,
                destination_port,
                flags_mask: Some(TcpFlags::from_bits(rule.tcp_flags_mask)),
                flags: Some(TcpFlags::from_bits(rule.tcp_flags_value)),
            }
        }
        proto::UDP => {
            let (source_port, destination_port) = port_ranges(rule);
            ProtocolSpec::Udp {
                source_port,
                destination_port,
            }
        }
        other => ProtocolSpec::Other { protocol: other },
    }
}
