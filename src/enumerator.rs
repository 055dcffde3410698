use crate::datatypes::{GridPoint, MaterialCombo};

/// Every (membrane, insulator, metal) combination; membrane outermost,
/// metal innermost.
///
/// The returned iterator is lazy and can be cloned to restart it.
pub fn enumerate_materials<'a>(
    membranes: &'a [String],
    insulators: &'a [String],
    metals: &'a [String],
) -> impl Iterator<Item = MaterialCombo<'a>> + Clone + 'a {
    membranes.iter().flat_map(move |membrane| {
        insulators.iter().flat_map(move |insulator| {
            metals.iter().map(move |metal| MaterialCombo {
                membrane,
                insulator,
                metal,
            })
        })
    })
}

/// Every (t_m, a, t_i, t_el) grid point; t_m outermost, t_el innermost.
pub fn enumerate_dimensions<'a>(
    t_m_list: &'a [f64],
    a_list: &'a [f64],
    t_i_list: &'a [f64],
    t_el_list: &'a [f64],
) -> impl Iterator<Item = GridPoint> + Clone + 'a {
    t_m_list.iter().flat_map(move |&t_m| {
        a_list.iter().flat_map(move |&a| {
            t_i_list.iter().flat_map(move |&t_i| {
                t_el_list.iter().map(move |&t_el| GridPoint {
                    membrane_thickness_um: t_m,
                    membrane_radius_um: a,
                    insulator_thickness_um: t_i,
                    electrode_thickness_um: t_el,
                })
            })
        })
    })
}
