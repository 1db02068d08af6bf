//! GraphQL documents sent to the log-hosting service.

/// Report and fight metadata plus the damage-done and potion tables, all in
/// one round trip.
pub const FIGHT_INFORMATION: &str = r#"
query FightInformation($code: String!, $id: [Int]!) {
  reportData {
    report(code: $code) {
      startTime
      region { compactName }
      table(fightIDs: $id, dataType: DamageDone)
      potionTable: table(fightIDs: $id, dataType: Buffs, abilityID: 1000049)
      fights(fightIDs: $id) {
        encounterID
        kill
        startTime
        endTime
        difficulty
        hasEcho
        phaseTransitions { id startTime }
      }
    }
  }
}
"#;

/// Damage-done table re-scoped to a phase window, for phase downtime.
pub const PHASE_DAMAGE_TABLE: &str = r#"
query PhaseDamageTable($code: String!, $id: [Int]!, $startTime: Float!, $endTime: Float!) {
  reportData {
    report(code: $code) {
      table(
        fightIDs: $id
        dataType: DamageDone
        startTime: $startTime
        endTime: $endTime
      )
    }
  }
}
"#;

/// One page of damage events for one source actor.
pub const DAMAGE_EVENTS: &str = r#"
query DamageEvents($code: String!, $id: [Int]!, $sourceID: Int!, $startTime: Float!, $endTime: Float!) {
  reportData {
    report(code: $code) {
      events(
        fightIDs: $id
        startTime: $startTime
        endTime: $endTime
        dataType: DamageDone
        sourceID: $sourceID
        includeResources: false
        useAbilityIDs: false
        limit: 10000
      ) {
        data
        nextPageTimestamp
      }
    }
  }
}
"#;

/// Aura uptime bands for one buff on one target.
pub const BUFF_TABLE: &str = r#"
query BuffTable($code: String!, $id: [Int]!, $targetID: Int!, $abilityID: Float!, $startTime: Float!, $endTime: Float!) {
  reportData {
    report(code: $code) {
      table(
        fightIDs: $id
        dataType: Buffs
        targetID: $targetID
        abilityID: $abilityID
        startTime: $startTime
        endTime: $endTime
      )
    }
  }
}
"#;

/// Apply/remove events for one buff on one target; applications carry the
/// ability that granted the buff in `extraAbilityGameID`.
pub const BUFF_EVENTS: &str = r#"
query BuffEvents($code: String!, $id: [Int]!, $targetID: Int!, $abilityID: Float!, $startTime: Float!, $endTime: Float!) {
  reportData {
    report(code: $code) {
      events(
        fightIDs: $id
        startTime: $startTime
        endTime: $endTime
        dataType: Buffs
        targetID: $targetID
        abilityID: $abilityID
        limit: 10000
      ) {
        data
        nextPageTimestamp
      }
    }
  }
}
"#;

/// Cast events for one source, optionally narrowed to one ability.
pub const CAST_EVENTS: &str = r#"
query CastEvents($code: String!, $id: [Int]!, $sourceID: Int!, $abilityID: Float, $startTime: Float!, $endTime: Float!) {
  reportData {
    report(code: $code) {
      events(
        fightIDs: $id
        startTime: $startTime
        endTime: $endTime
        dataType: Casts
        sourceID: $sourceID
        abilityID: $abilityID
        limit: 10000
      ) {
        data
        nextPageTimestamp
      }
    }
  }
}
"#;
