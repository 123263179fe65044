mod quiz_vm;

pub use quiz_vm::{
    AvatarCardVm, CategoryCardVm, FeedbackVm, FinishedVm, HeaderVm, HomeVm, MedalVm, OptionVm,
    PlayVm, burst_class, map_finished, map_header, map_home, map_medal, map_play,
};
