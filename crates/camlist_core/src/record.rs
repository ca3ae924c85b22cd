/// Stable unique identifier of a performer listing entry.
pub type CamId = u64;

/// The one thing the list machinery needs from a record.
///
/// Everything else on a record (nickname, thumbnails, viewer counts) is
/// opaque payload carried through untouched.
pub trait CamRecord {
    fn cam_id(&self) -> CamId;
}
