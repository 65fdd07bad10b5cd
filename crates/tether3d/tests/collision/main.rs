mod bond_mode;
mod virtual_site_mode;
