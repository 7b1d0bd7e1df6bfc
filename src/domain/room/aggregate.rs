//! Room aggregate entity.
//!
//! A room is the shared state of one planning poker table: who is seated,
//! what each of them picked, and whether the cards are face up.
//!
//! Every transition takes `now` from the caller and performs no I/O. The
//! orchestrator fetches a snapshot, applies one transition to its private
//! copy and writes the result back through the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{MemberId, Timestamp, ValidationError};

use super::{Member, RoomError, RoomPatch, RoomStatus};

/// Room aggregate - the estimation table.
///
/// # Invariants
///
/// - a member id appears at most once in `members`
/// - `result` is rebuilt from `members` after every estimate change,
///   reveal and reset, and is never patched incrementally
/// - `name` and `desk_config` never change after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    members: Vec<Member>,

    #[serde(default)]
    status: RoomStatus,

    /// Estimate value → number of members holding it.
    #[serde(default, deserialize_with = "null_as_empty")]
    result: BTreeMap<String, u32>,

    created_at: Timestamp,

    updated_at: Timestamp,

    #[serde(default)]
    desk_config: String,
}

impl Room {
    /// Create an empty room in the voting phase.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name or desk config is blank
    pub fn new(
        name: impl Into<String>,
        desk_config: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let desk_config = desk_config.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("room_name"));
        }
        if desk_config.trim().is_empty() {
            return Err(ValidationError::empty_field("desk_config"));
        }

        Ok(Self {
            name,
            members: Vec::new(),
            status: RoomStatus::Voting,
            result: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            desk_config,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in join order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn result(&self) -> &BTreeMap<String, u32> {
        &self.result
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn desk_config(&self) -> &str {
        &self.desk_config
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == member_id)
    }

    pub fn has_member(&self, member_id: &MemberId) -> bool {
        self.member(member_id).is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Seat a new member at the end of the member list.
    ///
    /// # Errors
    ///
    /// - `AlreadyMember` if the id is already seated
    pub fn join(&mut self, mut member: Member, now: Timestamp) -> Result<(), RoomError> {
        if self.has_member(&member.id) {
            return Err(RoomError::AlreadyMember(member.id));
        }

        member.estimated_value.clear();
        member.last_active_at = now;
        self.members.push(member);
        self.updated_at = now;
        Ok(())
    }

    /// Record a member's card and rebuild the result.
    ///
    /// Accepted in either phase, so a revealed result changes live.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member is not seated
    pub fn update_estimate(
        &mut self,
        member_id: &MemberId,
        value: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), RoomError> {
        let member = self.member_mut(member_id)?;
        member.estimated_value = value.into();
        member.last_active_at = now;

        self.recompute_result();
        self.updated_at = now;
        Ok(())
    }

    /// Turn the cards face up.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the acting member is not seated
    pub fn reveal(&mut self, member_id: &MemberId, now: Timestamp) -> Result<(), RoomError> {
        self.member_mut(member_id)?.last_active_at = now;

        self.status = RoomStatus::Revealed;
        self.recompute_result();
        self.updated_at = now;
        Ok(())
    }

    /// Start a new round: every estimate and the result are cleared together.
    ///
    /// Any connection may reset, seated or not.
    pub fn reset(&mut self, now: Timestamp) {
        for member in &mut self.members {
            member.estimated_value.clear();
        }
        self.result.clear();
        self.status = RoomStatus::Voting;
        self.updated_at = now;
    }

    /// Refresh a member's activity timestamp.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member is not seated
    pub fn touch(&mut self, member_id: &MemberId, now: Timestamp) -> Result<(), RoomError> {
        self.member_mut(member_id)?.last_active_at = now;
        self.updated_at = now;
        Ok(())
    }

    /// Overlay a partial write onto this snapshot.
    ///
    /// Used by store adapters to implement `update_fields`.
    pub fn apply_patch(&mut self, patch: RoomPatch) {
        if let Some(members) = patch.members {
            self.members = members;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(result) = patch.result {
            self.result = result;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn member_mut(&mut self, member_id: &MemberId) -> Result<&mut Member, RoomError> {
        self.members
            .iter_mut()
            .find(|m| &m.id == member_id)
            .ok_or_else(|| RoomError::MemberNotFound(member_id.clone()))
    }

    fn recompute_result(&mut self) {
        self.result = tally(&self.members);
    }
}

// Rooms created before anyone joined were stored with `null` collections.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Count members per non-empty estimate.
pub fn tally(members: &[Member]) -> BTreeMap<String, u32> {
    let mut result = BTreeMap::new();
    for member in members.iter().filter(|m| m.has_estimated()) {
        *result.entry(member.estimated_value.clone()).or_insert(0) += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> MemberId {
        MemberId::new(s).unwrap()
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    fn empty_room() -> Room {
        Room::new("Sprint 42", "fibonacci", t(0)).unwrap()
    }

    fn room_with(members: &[(&str, &str)]) -> Room {
        let mut room = empty_room();
        for (i, (member_id, value)) in members.iter().enumerate() {
            room.join(Member::new(id(member_id), *member_id, None, t(1)), t(1))
                .unwrap();
            if !value.is_empty() {
                room.update_estimate(&id(member_id), *value, t(2 + i as u64))
                    .unwrap();
            }
        }
        room
    }

    fn expected(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn new_room_starts_voting_and_empty() {
        let room = empty_room();
        assert_eq!(room.status(), RoomStatus::Voting);
        assert!(room.members().is_empty());
        assert!(room.result().is_empty());
        assert_eq!(room.created_at(), room.updated_at());
    }

    #[test]
    fn new_room_rejects_missing_fields() {
        assert!(Room::new("", "fibonacci", t(0)).is_err());
        assert!(Room::new("Sprint", " ", t(0)).is_err());
    }

    #[test]
    fn join_appends_member_without_estimate() {
        let mut room = empty_room();
        room.join(Member::new(id("u1"), "Ada", None, t(0)), t(5))
            .unwrap();

        assert_eq!(room.members().len(), 1);
        let member = &room.members()[0];
        assert_eq!(member.id(), &id("u1"));
        assert_eq!(member.name(), "Ada");
        assert_eq!(member.estimated_value(), "");
        assert_eq!(member.last_active_at(), &t(5));
        assert_eq!(room.updated_at(), &t(5));
        assert_eq!(room.status(), RoomStatus::Voting);
    }

    #[test]
    fn join_preserves_join_order() {
        let room = room_with(&[("u1", ""), ("u2", ""), ("u3", "")]);
        let ids: Vec<_> = room.members().iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn join_rejects_existing_member_and_keeps_state() {
        let mut room = room_with(&[("u1", "5")]);
        let before = room.clone();

        let err = room
            .join(Member::new(id("u1"), "Imposter", None, t(9)), t(9))
            .unwrap_err();

        assert_eq!(err, RoomError::AlreadyMember(id("u1")));
        assert_eq!(room, before);
    }

    #[test]
    fn update_estimate_recomputes_result() {
        let mut room = room_with(&[("u1", "5"), ("u2", "")]);

        room.update_estimate(&id("u2"), "8", t(10)).unwrap();

        assert_eq!(room.result(), &expected(&[("5", 1), ("8", 1)]));
        assert_eq!(room.member(&id("u2")).unwrap().last_active_at(), &t(10));
        assert_eq!(room.updated_at(), &t(10));
    }

    #[test]
    fn update_estimate_for_unknown_member_fails() {
        let mut room = room_with(&[("u1", "5")]);
        let before = room.clone();

        let err = room.update_estimate(&id("ghost"), "3", t(10)).unwrap_err();

        assert_eq!(err, RoomError::MemberNotFound(id("ghost")));
        assert_eq!(room, before);
    }

    #[test]
    fn update_estimate_allowed_after_reveal() {
        let mut room = room_with(&[("u1", "5")]);
        room.reveal(&id("u1"), t(10)).unwrap();

        room.update_estimate(&id("u1"), "13", t(11)).unwrap();

        assert_eq!(room.status(), RoomStatus::Revealed);
        assert_eq!(room.result(), &expected(&[("13", 1)]));
    }

    #[test]
    fn clearing_an_estimate_drops_it_from_result() {
        let mut room = room_with(&[("u1", "5"), ("u2", "5")]);
        room.update_estimate(&id("u1"), "", t(10)).unwrap();
        assert_eq!(room.result(), &expected(&[("5", 1)]));
    }

    #[test]
    fn reveal_sets_status_and_keeps_estimates() {
        let mut room = room_with(&[("u1", "3"), ("u2", "3"), ("u3", "")]);

        room.reveal(&id("u3"), t(20)).unwrap();

        assert_eq!(room.status(), RoomStatus::Revealed);
        assert_eq!(room.result(), &expected(&[("3", 2)]));
        assert_eq!(room.member(&id("u1")).unwrap().estimated_value(), "3");
        assert_eq!(room.member(&id("u3")).unwrap().last_active_at(), &t(20));
        assert_eq!(room.updated_at(), &t(20));
    }

    #[test]
    fn reveal_by_non_member_fails() {
        let mut room = room_with(&[("u1", "3")]);
        let before = room.clone();

        assert_eq!(
            room.reveal(&id("lurker"), t(20)).unwrap_err(),
            RoomError::MemberNotFound(id("lurker"))
        );
        assert_eq!(room, before);
    }

    #[test]
    fn reset_clears_round() {
        let mut room = room_with(&[("u1", "3"), ("u2", "8")]);
        room.reveal(&id("u1"), t(20)).unwrap();

        room.reset(t(30));

        assert_eq!(room.status(), RoomStatus::Voting);
        assert!(room.result().is_empty());
        assert!(room.members().iter().all(|m| m.estimated_value().is_empty()));
        assert_eq!(room.members().len(), 2);
        assert_eq!(room.updated_at(), &t(30));
    }

    #[test]
    fn touch_refreshes_activity_only() {
        let mut room = room_with(&[("u1", "3")]);
        room.touch(&id("u1"), t(40)).unwrap();

        let member = room.member(&id("u1")).unwrap();
        assert_eq!(member.last_active_at(), &t(40));
        assert_eq!(member.estimated_value(), "3");
        assert!(room.touch(&id("ghost"), t(41)).is_err());
    }

    #[test]
    fn apply_patch_overlays_only_present_fields() {
        let mut stored = room_with(&[("u1", "")]);
        let mut working = stored.clone();
        working.update_estimate(&id("u1"), "5", t(50)).unwrap();

        stored.apply_patch(RoomPatch::estimates_of(&working));

        assert_eq!(stored, working);
        assert_eq!(stored.name(), "Sprint 42");
    }

    #[test]
    fn round_patch_carries_reset_atomically() {
        let mut working = room_with(&[("u1", "5")]);
        working.reveal(&id("u1"), t(60)).unwrap();
        working.reset(t(61));

        let patch = RoomPatch::round_of(&working);

        assert_eq!(patch.status, Some(RoomStatus::Voting));
        assert_eq!(patch.result, Some(BTreeMap::new()));
        assert!(patch
            .members
            .unwrap()
            .iter()
            .all(|m| m.estimated_value().is_empty()));
    }

    #[test]
    fn serializes_in_document_shape() {
        let room = room_with(&[("u1", "5")]);
        let json = serde_json::to_value(&room).unwrap();

        assert_eq!(json["name"], "Sprint 42");
        assert_eq!(json["status"], "VOTING");
        assert_eq!(json["result"]["5"], 1);
        assert_eq!(json["desk_config"], "fibonacci");
        assert_eq!(json["members"][0]["estimated_value"], "5");
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn deserializes_legacy_document_without_members_or_result() {
        let json = r#"{
            "name": "Legacy",
            "status": "REVEALED_CARDS",
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2024-01-15T00:00:00Z",
            "desk_config": "tshirt"
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.status(), RoomStatus::Revealed);
        assert!(room.members().is_empty());
        assert!(room.result().is_empty());
    }

    #[test]
    fn deserializes_legacy_document_with_null_collections() {
        let json = r#"{
            "name": "Legacy",
            "members": null,
            "status": "VOTING",
            "result": null,
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2024-01-15T00:00:00Z",
            "member_ids": null,
            "desk_config": "fibonacci"
        }"#;
        let mut room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.status(), RoomStatus::Voting);
        assert!(room.members().is_empty());
        assert!(room.result().is_empty());

        room.join(Member::new(id("u1"), "Ada", None, t(1)), t(1))
            .unwrap();
        assert_eq!(room.members().len(), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Join(usize),
        Estimate(usize, &'static str),
        Reveal(usize),
        Reset,
    }

    const CARDS: &[&str] = &["", "1", "2", "3", "5", "8", "?"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..5).prop_map(Op::Join),
            (0usize..5, prop::sample::select(CARDS)).prop_map(|(m, v)| Op::Estimate(m, v)),
            (0usize..5).prop_map(Op::Reveal),
            Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn result_always_matches_member_estimates(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut room = empty_room();
            for (step, op) in ops.into_iter().enumerate() {
                let now = t(step as u64);
                let _ = match op {
                    Op::Join(m) => room.join(Member::new(id(&format!("m{m}")), "x", None, now), now),
                    Op::Estimate(m, v) => room.update_estimate(&id(&format!("m{m}")), v, now),
                    Op::Reveal(m) => room.reveal(&id(&format!("m{m}")), now),
                    Op::Reset => { room.reset(now); Ok(()) }
                };

                let estimated = room.members().iter().filter(|m| m.has_estimated()).count() as u32;
                prop_assert_eq!(room.result().values().sum::<u32>(), estimated);
                for (value, count) in room.result() {
                    let holders = room.members().iter().filter(|m| m.estimated_value() == value).count() as u32;
                    prop_assert_eq!(*count, holders);
                }

                let mut ids: Vec<_> = room.members().iter().map(|m| m.id().clone()).collect();
                let len = ids.len();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), len);
            }
        }
    }
}
