//! Sample program used when demo mode is switched on.

use std::f64::consts::FRAC_PI_2;

use spaceplan_core::SpaceNode;

/// A two-wing apartment: living area beside a private wing with two
/// bedrooms and a bathroom.
pub fn demo_program() -> SpaceNode {
    SpaceNode::split(
        "root",
        1631.34,
        FRAC_PI_2,
        vec![
            SpaceNode::split(
                "livingSection",
                897.24,
                0.0,
                vec![
                    SpaceNode::room("kitchenLiving", 652.54),
                    SpaceNode::room("office", 244.7),
                ],
            ),
            SpaceNode::split(
                "privateSection",
                734.1,
                0.0,
                vec![
                    SpaceNode::split(
                        "bedroomsSection",
                        570.97,
                        FRAC_PI_2,
                        vec![
                            SpaceNode::room("masterBedroom", 326.27),
                            SpaceNode::room("secondBedroom", 244.7),
                        ],
                    ),
                    SpaceNode::room("bathroom", 163.13),
                ],
            ),
        ],
    )
}
