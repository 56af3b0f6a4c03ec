//! The shared action state table. Ids below [`COMMON_ACTION_COUNT`] mean the
//! same thing for every character; ids at or above it are character-specific
//! (specials, transformation states, extra jumps) and live in per-character
//! tables over in [`crate::clips`].

/// The player is tumbling from a hit and the pose should spin to follow the
/// knockback arc.
pub const DAMAGE_FLY_ROLL: u16 = 0x5B;

/// First id in the character-specific range.
pub const COMMON_ACTION_COUNT: u16 = 0x155;

/// Fox and Falco's directional up special rush, grounded start. The pose
/// rotates to the angle the rush was aimed at.
pub const FOX_FALCO_SPECIAL_HI: u16 = 355;

/// Fox and Falco's directional up special rush, aerial start.
pub const FOX_FALCO_SPECIAL_AIR_HI: u16 = 356;

/// Looks up the canonical name for a shared action state id. Returns `None`
/// for ids in the character-specific range.
pub fn action_name(action_state_id: u16) -> Option<&'static str> {
    ACTION_NAMES.get(usize::from(action_state_id)).copied()
}

#[rustfmt::skip]
const ACTION_NAMES: [&str; 341] = [
    // 0x000
    "DeadDown", "DeadLeft", "DeadRight", "DeadUp", "DeadUpStar", "DeadUpStarIce",
    "DeadUpFall", "DeadUpFallHitCamera", "DeadUpFallHitCameraFlat", "DeadUpFallIce",
    "DeadUpFallHitCameraIce", "Sleep", "Rebirth", "RebirthWait", "Wait", "WalkSlow",
    // 0x010
    "WalkMiddle", "WalkFast", "Turn", "TurnRun", "Dash", "Run", "RunDirect", "RunBrake",
    "KneeBend", "JumpF", "JumpB", "JumpAerialF", "JumpAerialB", "Fall", "FallF", "FallB",
    // 0x020
    "FallAerial", "FallAerialF", "FallAerialB", "FallSpecial", "FallSpecialF",
    "FallSpecialB", "DamageFall", "Squat", "SquatWait", "SquatRv", "Landing",
    "LandingFallSpecial", "Attack11", "Attack12", "Attack13", "Attack100Start",
    // 0x030
    "Attack100Loop", "Attack100End", "AttackDash", "AttackS3Hi", "AttackS3HiS",
    "AttackS3S", "AttackS3LwS", "AttackS3Lw", "AttackHi3", "AttackLw3", "AttackS4Hi",
    "AttackS4HiS", "AttackS4S", "AttackS4LwS", "AttackS4Lw", "AttackHi4",
    // 0x040
    "AttackLw4", "AttackAirN", "AttackAirF", "AttackAirB", "AttackAirHi", "AttackAirLw",
    "LandingAirN", "LandingAirF", "LandingAirB", "LandingAirHi", "LandingAirLw",
    "DamageHi1", "DamageHi2", "DamageHi3", "DamageN1", "DamageN2",
    // 0x050
    "DamageN3", "DamageLw1", "DamageLw2", "DamageLw3", "DamageAir1", "DamageAir2",
    "DamageAir3", "DamageFlyHi", "DamageFlyN", "DamageFlyLw", "DamageFlyTop",
    "DamageFlyRoll", "LightGet", "HeavyGet", "LightThrowF", "LightThrowB",
    // 0x060
    "LightThrowHi", "LightThrowLw", "LightThrowDash", "LightThrowDrop",
    "LightThrowAirF", "LightThrowAirB", "LightThrowAirHi", "LightThrowAirLw",
    "HeavyThrowF", "HeavyThrowB", "HeavyThrowHi", "HeavyThrowLw", "LightThrowF4",
    "LightThrowB4", "LightThrowHi4", "LightThrowLw4",
    // 0x070
    "LightThrowAirF4", "LightThrowAirB4", "LightThrowAirHi4", "LightThrowAirLw4",
    "HeavyThrowF4", "HeavyThrowB4", "HeavyThrowHi4", "HeavyThrowLw4", "SwordSwing1",
    "SwordSwing3", "SwordSwing4", "SwordSwingDash", "BatSwing1", "BatSwing3",
    "BatSwing4", "BatSwingDash",
    // 0x080
    "ParasolSwing1", "ParasolSwing3", "ParasolSwing4", "ParasolSwingDash",
    "HarisenSwing1", "HarisenSwing3", "HarisenSwing4", "HarisenSwingDash",
    "StarRodSwing1", "StarRodSwing3", "StarRodSwing4", "StarRodSwingDash",
    "LipStickSwing1", "LipStickSwing3", "LipStickSwing4", "LipStickSwingDash",
    // 0x090
    "ItemParasolOpen", "ItemParasolFall", "ItemParasolFallSpecial",
    "ItemParasolDamageFall", "LGunShoot", "LGunShootAir", "LGunShootEmpty",
    "LGunShootAirEmpty", "FireFlowerShoot", "FireFlowerShootAir", "ItemScrew",
    "ItemScrewAir", "DamageScrew", "DamageScrewAir", "ItemScopeStart", "ItemScopeRapid",
    // 0x0A0
    "ItemScopeFire", "ItemScopeEnd", "ItemScopeAirStart", "ItemScopeAirRapid",
    "ItemScopeAirFire", "ItemScopeAirEnd", "ItemScopeStartEmpty", "ItemScopeRapidEmpty",
    "ItemScopeFireEmpty", "ItemScopeEndEmpty", "ItemScopeAirStartEmpty",
    "ItemScopeAirRapidEmpty", "ItemScopeAirFireEmpty", "ItemScopeAirEndEmpty",
    "LiftWait", "LiftWalk1",
    // 0x0B0
    "LiftWalk2", "LiftTurn", "GuardOn", "Guard", "GuardOff", "GuardSetOff",
    "GuardReflect", "DownBoundU", "DownWaitU", "DownDamageU", "DownStandU",
    "DownAttackU", "DownFowardU", "DownBackU", "DownSpotU", "DownBoundD",
    // 0x0C0
    "DownWaitD", "DownDamageD", "DownStandD", "DownAttackD", "DownFowardD",
    "DownBackD", "DownSpotD", "Passive", "PassiveStandF", "PassiveStandB",
    "PassiveWall", "PassiveWallJump", "PassiveCeil", "ShieldBreakFly",
    "ShieldBreakFall", "ShieldBreakDownU",
    // 0x0D0
    "ShieldBreakDownD", "ShieldBreakStandU", "ShieldBreakStandD", "FuraFura", "Catch",
    "CatchPull", "CatchDash", "CatchDashPull", "CatchWait", "CatchAttack", "CatchCut",
    "ThrowF", "ThrowB", "ThrowHi", "ThrowLw", "CapturePulledHi",
    // 0x0E0
    "CaptureWaitHi", "CaptureDamageHi", "CapturePulledLw", "CaptureWaitLw",
    "CaptureDamageLw", "CaptureCut", "CaptureJump", "CaptureNeck", "CaptureFoot",
    "EscapeF", "EscapeB", "Escape", "EscapeAir", "ReboundStop", "Rebound", "ThrownF",
    // 0x0F0
    "ThrownB", "ThrownHi", "ThrownLw", "ThrownLwWomen", "Pass", "Ottotto",
    "OttottoWait", "FlyReflectWall", "FlyReflectCeil", "StopWall", "StopCeil",
    "MissFoot", "CliffCatch", "CliffWait", "CliffClimbSlow", "CliffClimbQuick",
    // 0x100
    "CliffAttackSlow", "CliffAttackQuick", "CliffEscapeSlow", "CliffEscapeQuick",
    "CliffJumpSlow1", "CliffJumpSlow2", "CliffJumpQuick1", "CliffJumpQuick2",
    "AppealR", "AppealL", "ShoulderedWait", "ShoulderedWalkSlow",
    "ShoulderedWalkMiddle", "ShoulderedWalkFast", "ShoulderedTurn", "ThrownFF",
    // 0x110
    "ThrownFB", "ThrownFHi", "ThrownFLw", "CaptureCaptain", "CaptureYoshi",
    "YoshiEgg", "CaptureKoopa", "CaptureDamageKoopa", "CaptureWaitKoopa",
    "ThrownKoopaF", "ThrownKoopaB", "CaptureKoopaAir", "CaptureDamageKoopaAir",
    "CaptureWaitKoopaAir", "ThrownKoopaAirF", "ThrownKoopaAirB",
    // 0x120
    "CaptureKirby", "CaptureWaitKirby", "ThrownKirbyStar", "ThrownCopyStar",
    "ThrownKirby", "BarrelWait", "Bury", "BuryWait", "BuryJump", "DamageSong",
    "DamageSongWait", "DamageSongRv", "DamageBind", "CaptureMewtwo",
    "CaptureMewtwoAir", "ThrownMewtwo",
    // 0x130
    "ThrownMewtwoAir", "WarpStarJump", "WarpStarFall", "HammerWait", "HammerWalk",
    "HammerTurn", "HammerKneeBend", "HammerFall", "HammerJump", "HammerLanding",
    "KinokoGiantStart", "KinokoGiantStartAir", "KinokoGiantEnd", "KinokoGiantEndAir",
    "KinokoSmallStart", "KinokoSmallStartAir",
    // 0x140
    "KinokoSmallEnd", "KinokoSmallEndAir", "Entry", "EntryStart", "EntryEnd",
    "DamageIce", "DamageIceJump", "CaptureMasterhand", "CapturedamageMasterhand",
    "CapturewaitMasterhand", "ThrownMasterhand", "CaptureKirbyYoshi", "KirbyYoshiEgg",
    "CaptureRedead", "CaptureLikeLike", "DownReflect",
    // 0x150
    "CaptureCrazyhand", "CapturedamageCrazyhand", "CapturewaitCrazyhand",
    "ThrownCrazyhand", "BarrelCannonWait",
];
