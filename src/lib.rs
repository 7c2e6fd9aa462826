use lazy_static::lazy_static;
use member::FamilyMember;

pub mod branch_colors;
pub mod chinese_num;
pub mod collapse;
pub mod demo;
pub mod error;
pub mod layout;
pub mod member;
pub mod pedigree;
pub mod render_svg;
pub mod statistics;
pub mod tour;
pub mod uid;

lazy_static! {
    // Bundled sample family, used by the demo subcommand and tests
    pub static ref DEMO_MEMBERS: Vec<FamilyMember> =
        demo::demo_members().expect("Invalid bundled demo data");
}
