//! Names from the runtime library that generated code calls into.

/// Static helper class holding every encode and decode primitive.
pub const UTIL: &str = "global::SaintsField.Utils.SaintsSerializedUtil";

/// Callback interface the host serializer invokes around save and load.
pub const CALLBACK_RECEIVER: &str = "global::UnityEngine.ISerializationCallbackReceiver";

pub const SERIALIZE_FIELD: &str = "global::UnityEngine.SerializeField";
/// Links a shadow field back to its live member.
pub const SERIALIZED_ACTUAL: &str = "global::SaintsField.Utils.SaintsSerializedActual";
/// Inspector drawer for scalar capsules.
pub const SERIALIZED_ACTUAL_DRAWER: &str = "global::SaintsField.Utils.SaintsSerializedActualDrawer";

pub const SCALAR_CAPSULE: &str = "global::SaintsField.SaintsSerialization.SaintsSerializedProperty";
pub const DICTIONARY_CAPSULE: &str = "global::SaintsField.SaintsDictionary";
pub const REFERENCE_SET_CAPSULE: &str = "global::SaintsField.ReferenceHashSet";
pub const SET_CAPSULE: &str = "global::SaintsField.SaintsHashSet";

pub const LIST: &str = "global::System.Collections.Generic.List";
pub const DICTIONARY: &str = "global::System.Collections.Generic.Dictionary";
pub const HASH_SET: &str = "global::System.Collections.Generic.HashSet";
pub const ARRAY_EMPTY: &str = "global::System.Array.Empty";
