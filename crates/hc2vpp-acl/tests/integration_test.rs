//! Integration tests for the ACL customizer against a mock dataplane.
//!
//! These tests verify that ACLs are validated and fully encoded before any
//! request reaches the dataplane, that dumped rules read back under the
//! names they were written with, and that interface assignments keep input
//! ACLs ahead of output ACLs.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hc2vpp_acl::acl::{
    standard, Ace, AceAction, AceIpVersion, Acl, AclContextManager, AclCustomizer, AclError,
    AclKind, EthMatch, IcmpRange, InterfaceAclRefs, MacIpAce, MacIpL3, PortRange, ProtocolSpec,
    StandardAce, TcpFlags,
};
use hc2vpp_types::MacAddress;
use pretty_assertions::assert_eq;
use vpp_acl_api::{
    AclAddReplace, AclApi, AclDetails, AclInterfaceListDetails, AclInterfaceSetAclList, AclRule,
    MacipAclAdd, MacipAclDetails, MacipAclInterfaceAddDel, MacipAclInterfaceListDetails,
    VppError, VppResult, VppRetval, NEW_ACL_INDEX,
};

/// Mock VPP ACL plugin
///
/// Keeps ACLs in memory and records the name of every request it receives.
/// Clones share state, so a test can keep a handle after moving one clone
/// into a customizer.
#[derive(Clone, Default)]
pub struct MockVpp {
    calls: Arc<Mutex<Vec<String>>>,
    acls: Arc<Mutex<BTreeMap<u32, AclDetails>>>,
    macip_acls: Arc<Mutex<BTreeMap<u32, MacipAclDetails>>>,
    interface_lists: Arc<Mutex<BTreeMap<u32, AclInterfaceListDetails>>>,
    macip_bindings: Arc<Mutex<BTreeMap<u32, Vec<u32>>>>,
    next_index: Arc<Mutex<u32>>,
    fail_with: Arc<Mutex<Option<VppRetval>>>,
}

impl MockVpp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of all requests received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Makes every following request fail with `retval`.
    pub fn fail_with(&self, retval: VppRetval) {
        *self.fail_with.lock().unwrap() = Some(retval);
    }

    pub fn acl(&self, index: u32) -> Option<AclDetails> {
        self.acls.lock().unwrap().get(&index).cloned()
    }

    pub fn macip_acl(&self, index: u32) -> Option<MacipAclDetails> {
        self.macip_acls.lock().unwrap().get(&index).cloned()
    }

    /// Installs an ACL behind the translator's back.
    pub fn insert_acl(&self, tag: &str, rules: Vec<AclRule>) -> u32 {
        let index = self.allocate();
        self.acls.lock().unwrap().insert(
            index,
            AclDetails {
                acl_index: index,
                tag: tag.to_string(),
                rules,
            },
        );
        index
    }

    /// Returns the standard ACL list bound to an interface.
    pub fn interface_list(&self, sw_if_index: u32) -> Option<AclInterfaceListDetails> {
        self.interface_lists.lock().unwrap().get(&sw_if_index).cloned()
    }

    /// Overwrites the standard ACL list of an interface directly.
    pub fn set_interface_list(&self, details: AclInterfaceListDetails) {
        self.interface_lists
            .lock()
            .unwrap()
            .insert(details.sw_if_index, details);
    }

    /// Returns the MAC+IP ACLs bound to an interface.
    pub fn macip_binding(&self, sw_if_index: u32) -> Vec<u32> {
        self.macip_bindings
            .lock()
            .unwrap()
            .get(&sw_if_index)
            .cloned()
            .unwrap_or_default()
    }

    pub fn drop_acl(&self, index: u32) {
        self.acls.lock().unwrap().remove(&index);
    }

    fn allocate(&self) -> u32 {
        let mut next = self.next_index.lock().unwrap();
        let index = *next;
        *next += 1;
        index
    }

    fn record(&self, request: &str) -> VppResult<()> {
        self.calls.lock().unwrap().push(request.to_string());
        match *self.fail_with.lock().unwrap() {
            Some(retval) => retval.into_result(request),
            None => Ok(()),
        }
    }
}

impl AclApi for MockVpp {
    fn acl_add_replace(&mut self, request: &AclAddReplace) -> VppResult<u32> {
        self.record("acl_add_replace")?;
        let index = if request.is_create() {
            self.allocate()
        } else if self.acls.lock().unwrap().contains_key(&request.acl_index) {
            request.acl_index
        } else {
            return Err(VppError::Retval {
                request: "acl_add_replace".to_string(),
                retval: VppRetval::NoSuchEntry,
            });
        };
        self.acls.lock().unwrap().insert(
            index,
            AclDetails {
                acl_index: index,
                tag: request.tag.clone(),
                rules: request.rules.clone(),
            },
        );
        Ok(index)
    }

    fn acl_del(&mut self, acl_index: u32) -> VppResult<()> {
        self.record("acl_del")?;
        match self.acls.lock().unwrap().remove(&acl_index) {
            Some(_) => Ok(()),
            None => VppRetval::NoSuchEntry.into_result("acl_del"),
        }
    }

    fn acl_dump(&self, acl_index: u32) -> VppResult<Vec<AclDetails>> {
        self.record("acl_dump")?;
        let acls = self.acls.lock().unwrap();
        if acl_index == NEW_ACL_INDEX {
            return Ok(acls.values().cloned().collect());
        }
        Ok(acls.get(&acl_index).cloned().into_iter().collect())
    }

    fn macip_acl_add(&mut self, request: &MacipAclAdd) -> VppResult<u32> {
        self.record("macip_acl_add")?;
        let index = self.allocate();
        self.macip_acls.lock().unwrap().insert(
            index,
            MacipAclDetails {
                acl_index: index,
                tag: request.tag.clone(),
                rules: request.rules.clone(),
            },
        );
        Ok(index)
    }

    fn macip_acl_del(&mut self, acl_index: u32) -> VppResult<()> {
        self.record("macip_acl_del")?;
        match self.macip_acls.lock().unwrap().remove(&acl_index) {
            Some(_) => Ok(()),
            None => VppRetval::NoSuchEntry.into_result("macip_acl_del"),
        }
    }

    fn macip_acl_dump(&self, acl_index: u32) -> VppResult<Vec<MacipAclDetails>> {
        self.record("macip_acl_dump")?;
        let acls = self.macip_acls.lock().unwrap();
        if acl_index == NEW_ACL_INDEX {
            return Ok(acls.values().cloned().collect());
        }
        Ok(acls.get(&acl_index).cloned().into_iter().collect())
    }

    fn acl_interface_set_acl_list(&mut self, request: &AclInterfaceSetAclList) -> VppResult<()> {
        self.record("acl_interface_set_acl_list")?;
        let mut lists = self.interface_lists.lock().unwrap();
        if request.acls.is_empty() {
            lists.remove(&request.sw_if_index);
        } else {
            lists.insert(
                request.sw_if_index,
                AclInterfaceListDetails {
                    sw_if_index: request.sw_if_index,
                    n_input: request.n_input,
                    acls: request.acls.clone(),
                },
            );
        }
        Ok(())
    }

    fn acl_interface_list_dump(&self, sw_if_index: u32) -> VppResult<Vec<AclInterfaceListDetails>> {
        self.record("acl_interface_list_dump")?;
        Ok(self.interface_list(sw_if_index).into_iter().collect())
    }

    fn macip_acl_interface_add_del(&mut self, request: &MacipAclInterfaceAddDel) -> VppResult<()> {
        self.record("macip_acl_interface_add_del")?;
        let mut bindings = self.macip_bindings.lock().unwrap();
        let bound = bindings.entry(request.sw_if_index).or_default();
        if request.is_add {
            bound.clear();
            bound.push(request.acl_index);
        } else if bound.contains(&request.acl_index) {
            bound.retain(|index| *index != request.acl_index);
        } else {
            return VppRetval::NoSuchEntry.into_result("macip_acl_interface_add_del");
        }
        Ok(())
    }

    fn macip_acl_interface_list_dump(
        &self,
        sw_if_index: u32,
    ) -> VppResult<Vec<MacipAclInterfaceListDetails>> {
        self.record("macip_acl_interface_list_dump")?;
        let acls = self.macip_binding(sw_if_index);
        if acls.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![MacipAclInterfaceListDetails { sw_if_index, acls }])
    }
}

fn web_ace(name: &str, port: u16) -> Ace {
    Ace::Standard(StandardAce {
        name: name.to_string(),
        ip_version: Some(AceIpVersion::Ipv4 {
            source: Some("10.0.0.0/24".parse().unwrap()),
            destination: Some("0.0.0.0/0".parse().unwrap()),
        }),
        protocol: Some(ProtocolSpec::Tcp {
            source_port: Some(PortRange::new(1024, 65535)),
            destination_port: Some(PortRange::new(port, port)),
            flags_mask: Some(TcpFlags::default()),
            flags: Some(TcpFlags::default()),
        }),
        action: AceAction::Permit,
    })
}

fn ping_ace() -> Ace {
    Ace::Standard(StandardAce {
        name: "ping".to_string(),
        ip_version: Some(AceIpVersion::Ipv6 {
            source: Some("2001:db8::/32".parse().unwrap()),
            destination: Some("::/0".parse().unwrap()),
        }),
        protocol: Some(ProtocolSpec::IcmpV6 {
            type_range: Some(IcmpRange::new(128, 128)),
            code_range: Some(IcmpRange::ALL),
        }),
        action: AceAction::Stateful,
    })
}

fn web_acl() -> Acl {
    Acl {
        name: "web".to_string(),
        kind: AclKind::Vpp,
        aces: vec![web_ace("http", 80), web_ace("https", 443), ping_ace()],
    }
}

fn hosts_acl(action: AceAction) -> Acl {
    Acl {
        name: "hosts".to_string(),
        kind: AclKind::MacIp,
        aces: vec![Ace::MacIp(MacIpAce {
            name: "host1".to_string(),
            eth: Some(EthMatch {
                source_mac: Some("02:00:00:00:00:01".parse().unwrap()),
                source_mac_mask: Some(MacAddress::EXACT_MASK),
            }),
            l3: Some(MacIpL3::Ipv4 {
                source: Some("192.168.0.10/32".parse().unwrap()),
            }),
            action,
        })],
    }
}

#[test]
fn test_write_sends_encoded_rules() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());

    let acl = web_acl();
    let index = customizer.write(&acl).unwrap();

    assert_eq!(vpp.calls(), vec!["acl_add_replace"]);
    let stored = vpp.acl(index).unwrap();
    assert_eq!(stored.tag, "web");
    assert_eq!(stored.rules.len(), 3);
    assert_eq!(stored.rules[0].dstport_or_icmpcode_first, 80);
    assert_eq!(stored.rules[1].dstport_or_icmpcode_first, 443);
    assert!(stored.rules[2].is_ipv6());
    assert_eq!(stored.rules[2].is_permit, 2);

    assert_eq!(customizer.context(AclKind::Vpp).acl_index("web"), Some(index));
}

#[test]
fn test_write_then_read_round_trip() {
    let mut customizer = AclCustomizer::new(MockVpp::new());
    let acl = web_acl();
    customizer.write(&acl).unwrap();

    let read = customizer.read(AclKind::Vpp, "web").unwrap().unwrap();
    assert_eq!(read, acl);
}

#[test]
fn test_failed_encode_never_reaches_dataplane() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());

    let mut acl = web_acl();
    acl.aces.push(Ace::Standard(StandardAce {
        name: "mirror".to_string(),
        ip_version: None,
        protocol: None,
        action: AceAction::Unknown("mirror".to_string()),
    }));

    let err = customizer.write(&acl).unwrap_err();
    assert!(matches!(err, AclError::UnsupportedAction { ref ace, .. } if ace == "mirror"));
    assert!(vpp.calls().is_empty());
    assert!(!customizer.context(AclKind::Vpp).contains_acl("web"));
}

#[test]
fn test_stateful_macip_never_reaches_dataplane() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());

    let err = customizer.write(&hosts_acl(AceAction::Stateful)).unwrap_err();
    assert!(matches!(err, AclError::UnsupportedAction { .. }));
    assert!(vpp.calls().is_empty());
}

#[test]
fn test_invalid_acl_is_rejected() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());

    let empty = Acl {
        name: "empty".to_string(),
        kind: AclKind::Vpp,
        aces: Vec::new(),
    };
    assert!(matches!(
        customizer.write(&empty),
        Err(AclError::Validation { .. })
    ));

    let mut mixed = web_acl();
    mixed.aces.extend(hosts_acl(AceAction::Permit).aces);
    assert!(matches!(
        customizer.write(&mixed),
        Err(AclError::Validation { .. })
    ));

    assert!(vpp.calls().is_empty());
}

#[test]
fn test_write_twice_is_rejected() {
    let mut customizer = AclCustomizer::new(MockVpp::new());
    customizer.write(&web_acl()).unwrap();
    assert!(matches!(
        customizer.write(&web_acl()),
        Err(AclError::Validation { .. })
    ));
}

#[test]
fn test_update_replaces_in_place() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let index = customizer.write(&web_acl()).unwrap();

    let updated = Acl {
        aces: vec![web_ace("ssh", 22)],
        ..web_acl()
    };
    assert_eq!(customizer.update(&updated).unwrap(), index);

    let stored = vpp.acl(index).unwrap();
    assert_eq!(stored.rules.len(), 1);
    assert_eq!(stored.rules[0].dstport_or_icmpcode_first, 22);
    assert_eq!(
        customizer.read(AclKind::Vpp, "web").unwrap().unwrap(),
        updated
    );
}

#[test]
fn test_update_macip_readds() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let old_index = customizer.write(&hosts_acl(AceAction::Permit)).unwrap();

    let new_index = customizer.update(&hosts_acl(AceAction::Deny)).unwrap();
    assert_ne!(new_index, old_index);
    assert!(vpp.macip_acl(old_index).is_none());
    assert_eq!(vpp.macip_acl(new_index).unwrap().rules[0].is_permit, 0);
    assert_eq!(
        vpp.calls(),
        vec!["macip_acl_add", "macip_acl_del", "macip_acl_add"]
    );
    assert_eq!(
        customizer.context(AclKind::MacIp).acl_index("hosts"),
        Some(new_index)
    );
}

#[test]
fn test_update_unknown_acl() {
    let mut customizer = AclCustomizer::new(MockVpp::new());
    assert!(matches!(
        customizer.update(&web_acl()),
        Err(AclError::NotMapped(ref name)) if name == "web"
    ));
}

#[test]
fn test_delete_checks_interface_references() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let index = customizer.write(&web_acl()).unwrap();

    let interfaces = vec![InterfaceAclRefs {
        interface: "GigabitEthernet0/8/0".to_string(),
        egress: vec!["web".to_string()],
        ..Default::default()
    }];
    assert!(matches!(
        customizer.delete(&web_acl(), &interfaces),
        Err(AclError::Validation { .. })
    ));
    assert!(vpp.acl(index).is_some());

    customizer.delete(&web_acl(), &[]).unwrap();
    assert!(vpp.acl(index).is_none());
    assert!(!customizer.context(AclKind::Vpp).contains_acl("web"));
    assert_eq!(vpp.calls(), vec!["acl_add_replace", "acl_del"]);
}

#[test]
fn test_delete_macip() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let index = customizer.write(&hosts_acl(AceAction::Permit)).unwrap();

    let interfaces = vec![InterfaceAclRefs {
        interface: "local0".to_string(),
        macip: Some("hosts".to_string()),
        ..Default::default()
    }];
    assert!(customizer
        .delete(&hosts_acl(AceAction::Permit), &interfaces)
        .is_err());

    customizer
        .delete(&hosts_acl(AceAction::Permit), &[])
        .unwrap();
    assert!(vpp.macip_acl(index).is_none());
}

#[test]
fn test_dataplane_failure_is_propagated() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    vpp.fail_with(VppRetval::InvalidValue);

    match customizer.write(&web_acl()) {
        Err(AclError::Dataplane(e)) => assert_eq!(e.retval(), Some(VppRetval::InvalidValue)),
        other => panic!("expected a dataplane error, got {:?}", other),
    }
    assert!(!customizer.context(AclKind::Vpp).contains_acl("web"));
}

#[test]
fn test_read_all_invents_names() {
    let vpp = MockVpp::new();
    let deny_all = standard::encode(&StandardAce {
        name: "unused".to_string(),
        ip_version: None,
        protocol: None,
        action: AceAction::Deny,
    })
    .unwrap();
    let foreign = vpp.insert_acl("", vec![deny_all]);

    let mut customizer = AclCustomizer::with_contexts(
        vpp.clone(),
        AclContextManager::new("acl-"),
        AclContextManager::default(),
    );
    customizer.write(&web_acl()).unwrap();

    let acls = customizer.read_all(AclKind::Vpp).unwrap();
    let names: Vec<&str> = acls.iter().map(|acl| acl.name.as_str()).collect();
    assert_eq!(names, vec![format!("acl-{}", foreign).as_str(), "web"]);
    assert_eq!(acls[0].aces[0].name(), "acl-rule0");
    assert_eq!(acls[1], web_acl());

    // Invented names are stable across reads.
    let again = customizer.read_all(AclKind::Vpp).unwrap();
    assert_eq!(again[0].name, acls[0].name);
}

#[test]
fn test_read_missing_acl() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let index = customizer.write(&web_acl()).unwrap();

    vpp.drop_acl(index);
    assert_eq!(customizer.read(AclKind::Vpp, "web").unwrap(), None);
    assert!(matches!(
        customizer.read(AclKind::Vpp, "other"),
        Err(AclError::NotMapped(_))
    ));
}

#[test]
fn test_read_macip() {
    let mut customizer = AclCustomizer::new(MockVpp::new());
    customizer.write(&hosts_acl(AceAction::Deny)).unwrap();

    let read = customizer.read(AclKind::MacIp, "hosts").unwrap().unwrap();
    assert_eq!(read, hosts_acl(AceAction::Deny));
}

fn ssh_acl() -> Acl {
    Acl {
        name: "ssh".to_string(),
        kind: AclKind::Vpp,
        aces: vec![web_ace("ssh", 22)],
    }
}

fn eth0(ingress: &[&str], egress: &[&str], macip: Option<&str>) -> InterfaceAclRefs {
    InterfaceAclRefs {
        interface: "eth0".to_string(),
        ingress: ingress.iter().map(|name| name.to_string()).collect(),
        egress: egress.iter().map(|name| name.to_string()).collect(),
        macip: macip.map(str::to_string),
    }
}

#[test]
fn test_assign_puts_ingress_first() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let web = customizer.write(&web_acl()).unwrap();
    let ssh = customizer.write(&ssh_acl()).unwrap();
    let hosts = customizer.write(&hosts_acl(AceAction::Permit)).unwrap();

    customizer
        .assign(5, &eth0(&["ssh"], &["web", "ssh"], Some("hosts")))
        .unwrap();

    let list = vpp.interface_list(5).unwrap();
    assert_eq!(list.n_input, 1);
    assert_eq!(list.acls, vec![ssh, web, ssh]);
    assert_eq!(vpp.macip_binding(5), vec![hosts]);
    assert_eq!(
        &vpp.calls()[3..],
        &["acl_interface_set_acl_list", "macip_acl_interface_add_del"]
    );
}

#[test]
fn test_assign_egress_only() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let web = customizer.write(&web_acl()).unwrap();

    customizer.assign(2, &eth0(&[], &["web"], None)).unwrap();

    let list = vpp.interface_list(2).unwrap();
    assert_eq!(list.n_input, 0);
    assert_eq!(list.acls, vec![web]);
    assert!(!vpp.calls().contains(&"macip_acl_interface_add_del".to_string()));
}

#[test]
fn test_assign_unknown_acl_sends_nothing() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    customizer.write(&web_acl()).unwrap();

    let err = customizer
        .assign(5, &eth0(&["web"], &[], Some("hosts")))
        .unwrap_err();
    assert!(matches!(err, AclError::NotMapped(ref name) if name == "hosts"));

    // A MAC+IP name is not a standard ACL.
    customizer.write(&hosts_acl(AceAction::Permit)).unwrap();
    let err = customizer.assign(5, &eth0(&["hosts"], &[], None)).unwrap_err();
    assert!(matches!(err, AclError::NotMapped(ref name) if name == "hosts"));

    assert_eq!(vpp.calls(), vec!["acl_add_replace", "macip_acl_add"]);
}

#[test]
fn test_read_assignments_splits_on_n_input() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    customizer.write(&web_acl()).unwrap();
    customizer.write(&ssh_acl()).unwrap();
    customizer.write(&hosts_acl(AceAction::Deny)).unwrap();

    let refs = eth0(&["web", "ssh"], &["ssh"], Some("hosts"));
    customizer.assign(3, &refs).unwrap();

    assert_eq!(customizer.read_assignments("eth0", 3).unwrap(), refs);
    assert_eq!(
        customizer.read_assignments("eth1", 4).unwrap(),
        InterfaceAclRefs {
            interface: "eth1".to_string(),
            ..Default::default()
        }
    );
}

#[test]
fn test_read_assignments_invents_names() {
    let vpp = MockVpp::new();
    let foreign = vpp.insert_acl("", Vec::new());
    vpp.set_interface_list(AclInterfaceListDetails {
        sw_if_index: 1,
        n_input: 0,
        acls: vec![foreign],
    });

    let mut customizer = AclCustomizer::with_contexts(
        vpp.clone(),
        AclContextManager::new("acl-"),
        AclContextManager::default(),
    );
    let refs = customizer.read_assignments("eth0", 1).unwrap();
    assert!(refs.ingress.is_empty());
    assert_eq!(refs.egress, vec![format!("acl-{}", foreign)]);
}

#[test]
fn test_read_assignments_rejects_bad_n_input() {
    let vpp = MockVpp::new();
    vpp.set_interface_list(AclInterfaceListDetails {
        sw_if_index: 1,
        n_input: 3,
        acls: vec![0, 1],
    });

    let mut customizer = AclCustomizer::new(vpp.clone());
    match customizer.read_assignments("eth0", 1) {
        Err(AclError::Dataplane(VppError::InvalidReply { request, .. })) => {
            assert_eq!(request, "acl_interface_list_dump")
        }
        other => panic!("expected an invalid reply, got {:?}", other),
    }
}

#[test]
fn test_update_assignment() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    let web = customizer.write(&web_acl()).unwrap();
    let ssh = customizer.write(&ssh_acl()).unwrap();
    let hosts = customizer.write(&hosts_acl(AceAction::Permit)).unwrap();

    let before = eth0(&["web"], &[], Some("hosts"));
    customizer.assign(7, &before).unwrap();
    assert_eq!(vpp.macip_binding(7), vec![hosts]);

    let after = eth0(&["ssh"], &["web"], None);
    customizer.update_assignment(7, &before, &after).unwrap();

    let list = vpp.interface_list(7).unwrap();
    assert_eq!(list.n_input, 1);
    assert_eq!(list.acls, vec![ssh, web]);
    assert!(vpp.macip_binding(7).is_empty());
    assert_eq!(customizer.read_assignments("eth0", 7).unwrap(), after);

    // An unchanged MAC+IP binding is left alone.
    let calls = vpp.calls().len();
    customizer.update_assignment(7, &after, &after).unwrap();
    assert_eq!(&vpp.calls()[calls..], &["acl_interface_set_acl_list"]);
}

#[test]
fn test_unassign_then_delete() {
    let vpp = MockVpp::new();
    let mut customizer = AclCustomizer::new(vpp.clone());
    customizer.write(&web_acl()).unwrap();
    customizer.write(&hosts_acl(AceAction::Permit)).unwrap();

    let refs = eth0(&["web"], &[], Some("hosts"));
    customizer.assign(9, &refs).unwrap();
    assert!(customizer.delete(&web_acl(), &[refs.clone()]).is_err());

    customizer.unassign(9, &refs).unwrap();
    assert!(vpp.interface_list(9).is_none());
    assert!(vpp.macip_binding(9).is_empty());

    let current = customizer.read_assignments("eth0", 9).unwrap();
    customizer.delete(&web_acl(), &[current]).unwrap();
}
