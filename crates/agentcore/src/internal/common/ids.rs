use crate::define_id_type;

// Identity of one cluster member.
define_id_type!(NodeId, u64);

// Identity of one payload stored in the object store.
define_id_type!(ObjectId, u64);
