//! Writes, updates, deletes and reads ACLs through an [`AclApi`] transport,
//! and binds them to interfaces.
//!
//! Every entry of an ACL is encoded before the transport is called. A
//! translation failure therefore never leaves a partial ACL in the dataplane.
//! Interface assignments likewise resolve every ACL name before the first
//! request is sent.

use tracing::{debug, info};
use vpp_acl_api::{
    AclAddReplace, AclApi, AclInterfaceSetAclList, MacipAclAdd, MacipAclInterfaceAddDel,
    VppError, NEW_ACL_INDEX,
};

use super::context::AclContextManager;
use super::converter::{self, AclRules};
use super::error::{AclError, Result};
use super::types::{Ace, Acl, AclKind, InterfaceAclRefs};
use super::validator;

/// ACL customizer bound to one dataplane connection.
pub struct AclCustomizer<A: AclApi> {
    api: A,
    standard_ctx: AclContextManager,
    macip_ctx: AclContextManager,
}

impl<A: AclApi> AclCustomizer<A> {
    /// Creates a customizer with empty naming contexts.
    pub fn new(api: A) -> Self {
        Self::with_contexts(api, AclContextManager::default(), AclContextManager::default())
    }

    /// Creates a customizer with the given standard and MAC+IP naming contexts.
    pub fn with_contexts(
        api: A,
        standard_ctx: AclContextManager,
        macip_ctx: AclContextManager,
    ) -> Self {
        Self {
            api,
            standard_ctx,
            macip_ctx,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the naming context of `kind`.
    pub fn context(&self, kind: AclKind) -> &AclContextManager {
        match kind {
            AclKind::Vpp => &self.standard_ctx,
            AclKind::MacIp => &self.macip_ctx,
        }
    }

    fn context_mut(&mut self, kind: AclKind) -> &mut AclContextManager {
        match kind {
            AclKind::Vpp => &mut self.standard_ctx,
            AclKind::MacIp => &mut self.macip_ctx,
        }
    }

    fn index_of(&self, acl: &Acl) -> Result<u32> {
        self.index_by_name(acl.kind, &acl.name)
    }

    fn index_by_name(&self, kind: AclKind, name: &str) -> Result<u32> {
        self.context(kind)
            .acl_index(name)
            .ok_or_else(|| AclError::NotMapped(name.to_string()))
    }

    /// Creates an ACL in the dataplane and returns its index.
    pub fn write(&mut self, acl: &Acl) -> Result<u32> {
        validator::validate_write(acl)?;
        if self.context(acl.kind).contains_acl(&acl.name) {
            return Err(AclError::validation(acl.name.as_str(), "already exists"));
        }
        let rules = converter::encode_acl(acl)?;

        let index = match rules {
            AclRules::Standard(rules) => self
                .api
                .acl_add_replace(&AclAddReplace::create(acl.name.as_str(), rules))?,
            AclRules::MacIp(rules) => self.api.macip_acl_add(&MacipAclAdd {
                tag: acl.name.clone(),
                rules,
            })?,
        };

        self.context_mut(acl.kind)
            .add_acl(index, &acl.name, converter::ace_names(acl));
        info!(acl = %acl.name, kind = %acl.kind, index, "ACL written");
        Ok(index)
    }

    /// Replaces the entries of an existing ACL and returns its index.
    ///
    /// Standard ACLs are replaced in place. MAC+IP ACLs cannot be, so they
    /// are deleted and added again and may come back under a new index.
    pub fn update(&mut self, acl: &Acl) -> Result<u32> {
        validator::validate_update(acl)?;
        let old_index = self.index_of(acl)?;
        let rules = converter::encode_acl(acl)?;

        let index = match rules {
            AclRules::Standard(rules) => self.api.acl_add_replace(&AclAddReplace::replace(
                old_index,
                acl.name.as_str(),
                rules,
            ))?,
            AclRules::MacIp(rules) => {
                self.api.macip_acl_del(old_index)?;
                self.macip_ctx.remove_acl(&acl.name);
                self.api.macip_acl_add(&MacipAclAdd {
                    tag: acl.name.clone(),
                    rules,
                })?
            }
        };

        self.context_mut(acl.kind)
            .add_acl(index, &acl.name, converter::ace_names(acl));
        info!(acl = %acl.name, kind = %acl.kind, old_index, index, "ACL updated");
        Ok(index)
    }

    /// Deletes an ACL no interface refers to.
    pub fn delete(&mut self, acl: &Acl, interfaces: &[InterfaceAclRefs]) -> Result<()> {
        validator::validate_delete(acl, interfaces)?;
        let index = self.index_of(acl)?;

        match acl.kind {
            AclKind::Vpp => self.api.acl_del(index)?,
            AclKind::MacIp => self.api.macip_acl_del(index)?,
        }

        self.context_mut(acl.kind).remove_acl(&acl.name);
        info!(acl = %acl.name, kind = %acl.kind, index, "ACL deleted");
        Ok(())
    }

    /// Reads one ACL back from the dataplane.
    ///
    /// Returns `None` if the dataplane no longer has the stored index.
    pub fn read(&mut self, kind: AclKind, name: &str) -> Result<Option<Acl>> {
        let index = self
            .context(kind)
            .acl_index(name)
            .ok_or_else(|| AclError::NotMapped(name.to_string()))?;

        let acl = match kind {
            AclKind::Vpp => match self.api.acl_dump(index)?.into_iter().next() {
                Some(details) => Some(self.standard_acl(name, &details.rules)?),
                None => None,
            },
            AclKind::MacIp => match self.api.macip_acl_dump(index)?.into_iter().next() {
                Some(details) => Some(self.macip_acl(name, &details.rules)?),
                None => None,
            },
        };

        debug!(acl = name, %kind, index, found = acl.is_some(), "ACL read");
        Ok(acl)
    }

    /// Reads every ACL of `kind` from the dataplane.
    ///
    /// ACLs not written through this customizer get invented names.
    pub fn read_all(&mut self, kind: AclKind) -> Result<Vec<Acl>> {
        let mut acls = Vec::new();
        match kind {
            AclKind::Vpp => {
                for details in self.api.acl_dump(NEW_ACL_INDEX)? {
                    let name = self.standard_ctx.acl_name(details.acl_index);
                    acls.push(self.standard_acl(&name, &details.rules)?);
                }
            }
            AclKind::MacIp => {
                for details in self.api.macip_acl_dump(NEW_ACL_INDEX)? {
                    let name = self.macip_ctx.acl_name(details.acl_index);
                    acls.push(self.macip_acl(&name, &details.rules)?);
                }
            }
        }
        debug!(%kind, count = acls.len(), "ACLs read");
        Ok(acls)
    }

    /// Binds the ACLs listed in `refs` to the interface `sw_if_index`.
    ///
    /// Standard ACLs go out as one list, ingress before egress. The MAC+IP
    /// ACL, if any, is bound with a separate request.
    pub fn assign(&mut self, sw_if_index: u32, refs: &InterfaceAclRefs) -> Result<()> {
        let list = self.standard_list(sw_if_index, refs)?;
        let macip = self.macip_index(refs.macip.as_deref())?;

        if list.count() > 0 {
            self.api.acl_interface_set_acl_list(&list)?;
        }
        if let Some(acl_index) = macip {
            self.api
                .macip_acl_interface_add_del(&MacipAclInterfaceAddDel::add(sw_if_index, acl_index))?;
        }

        info!(
            interface = %refs.interface,
            sw_if_index,
            ingress = ?refs.ingress,
            egress = ?refs.egress,
            macip = ?refs.macip,
            "ACLs assigned"
        );
        Ok(())
    }

    /// Moves an interface from the assignments in `before` to those in
    /// `after`.
    ///
    /// The standard list is always sent again. The MAC+IP binding is only
    /// touched when it changed.
    pub fn update_assignment(
        &mut self,
        sw_if_index: u32,
        before: &InterfaceAclRefs,
        after: &InterfaceAclRefs,
    ) -> Result<()> {
        let list = self.standard_list(sw_if_index, after)?;
        let macip_change = if before.macip == after.macip {
            None
        } else {
            Some((
                self.macip_index(before.macip.as_deref())?,
                self.macip_index(after.macip.as_deref())?,
            ))
        };

        self.api.acl_interface_set_acl_list(&list)?;
        if let Some((removed, added)) = macip_change {
            if let Some(acl_index) = removed {
                self.api.macip_acl_interface_add_del(&MacipAclInterfaceAddDel::del(
                    sw_if_index,
                    acl_index,
                ))?;
            }
            if let Some(acl_index) = added {
                self.api.macip_acl_interface_add_del(&MacipAclInterfaceAddDel::add(
                    sw_if_index,
                    acl_index,
                ))?;
            }
        }

        info!(interface = %after.interface, sw_if_index, "ACL assignments updated");
        Ok(())
    }

    /// Unbinds every ACL listed in `refs` from the interface `sw_if_index`.
    pub fn unassign(&mut self, sw_if_index: u32, refs: &InterfaceAclRefs) -> Result<()> {
        let macip = self.macip_index(refs.macip.as_deref())?;

        if !refs.ingress.is_empty() || !refs.egress.is_empty() {
            self.api
                .acl_interface_set_acl_list(&AclInterfaceSetAclList {
                    sw_if_index,
                    ..Default::default()
                })?;
        }
        if let Some(acl_index) = macip {
            self.api
                .macip_acl_interface_add_del(&MacipAclInterfaceAddDel::del(sw_if_index, acl_index))?;
        }

        info!(interface = %refs.interface, sw_if_index, "ACLs unassigned");
        Ok(())
    }

    /// Reads the ACLs bound to the interface `sw_if_index`.
    ///
    /// ACLs bound outside this customizer get invented names.
    pub fn read_assignments(
        &mut self,
        interface: &str,
        sw_if_index: u32,
    ) -> Result<InterfaceAclRefs> {
        let mut refs = InterfaceAclRefs {
            interface: interface.to_string(),
            ..Default::default()
        };

        if let Some(details) = self.api.acl_interface_list_dump(sw_if_index)?.into_iter().next() {
            check_interface("acl_interface_list_dump", sw_if_index, details.sw_if_index)?;
            let (Some(input), Some(output)) = (details.input(), details.output()) else {
                return Err(VppError::invalid_reply(
                    "acl_interface_list_dump",
                    format!(
                        "n_input {} exceeds {} ACLs",
                        details.n_input,
                        details.acls.len()
                    ),
                )
                .into());
            };
            refs.ingress = input.iter().map(|i| self.standard_ctx.acl_name(*i)).collect();
            refs.egress = output.iter().map(|i| self.standard_ctx.acl_name(*i)).collect();
        }

        if let Some(details) = self
            .api
            .macip_acl_interface_list_dump(sw_if_index)?
            .into_iter()
            .next()
        {
            check_interface("macip_acl_interface_list_dump", sw_if_index, details.sw_if_index)?;
            refs.macip = details.acls.first().map(|i| self.macip_ctx.acl_name(*i));
        }

        debug!(interface, sw_if_index, ?refs, "ACL assignments read");
        Ok(refs)
    }

    fn standard_list(
        &self,
        sw_if_index: u32,
        refs: &InterfaceAclRefs,
    ) -> Result<AclInterfaceSetAclList> {
        let resolve = |names: &[String]| {
            names
                .iter()
                .map(|name| self.index_by_name(AclKind::Vpp, name))
                .collect::<Result<Vec<_>>>()
        };
        let input = resolve(refs.ingress.as_slice())?;
        let output = resolve(refs.egress.as_slice())?;

        AclInterfaceSetAclList::new(sw_if_index, &input, &output).ok_or_else(|| {
            AclError::validation(
                format!("list of interface {}", refs.interface),
                format!("{} ACLs exceed the limit of 255", input.len() + output.len()),
            )
        })
    }

    fn macip_index(&self, name: Option<&str>) -> Result<Option<u32>> {
        name.map(|name| self.index_by_name(AclKind::MacIp, name))
            .transpose()
    }

    fn standard_acl(&mut self, name: &str, rules: &[vpp_acl_api::AclRule]) -> Result<Acl> {
        let aces = converter::to_standard_aces(name, rules, &mut self.standard_ctx)?;
        Ok(Acl {
            name: name.to_string(),
            kind: AclKind::Vpp,
            aces: aces.into_iter().map(Ace::Standard).collect(),
        })
    }

    fn macip_acl(&mut self, name: &str, rules: &[vpp_acl_api::MacipAclRule]) -> Result<Acl> {
        let aces = converter::to_macip_aces(name, rules, &mut self.macip_ctx)?;
        Ok(Acl {
            name: name.to_string(),
            kind: AclKind::MacIp,
            aces: aces.into_iter().map(Ace::MacIp).collect(),
        })
    }
}

fn check_interface(request: &str, expected: u32, got: u32) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(VppError::invalid_reply(
            request,
            format!("asked for interface {}, got {}", expected, got),
        )
        .into())
    }
}
