//! Twelve-launch CSV shared by the unit tests.
//!
//! Per site: CCAFS LC-40 4 launches (1 success), VAFB SLC-4E 3 (2),
//! KSC LC-39A 3 (2), CCAFS SLC-40 2 (2). Payloads span 0..=9600 kg.

use super::loader::load_reader;
use super::model::LaunchDataset;

pub const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,3,CCAFS LC-40,1,3170.0,F9 v1.1  B1011,v1.1
3,4,CCAFS LC-40,0,4535.0,F9 v1.1,v1.1
4,5,VAFB SLC-4E,0,4000.0,F9 v1.1  B1003,v1.1
5,6,VAFB SLC-4E,1,2495.0,F9 FT B1029.1,FT
6,7,VAFB SLC-4E,1,9600.0,F9 B4  B1041.1,B4
7,8,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
8,9,KSC LC-39A,1,5300.0,F9 FT B1032.1,FT
9,10,KSC LC-39A,0,3600.0,F9 FT  B1030,FT
10,11,CCAFS SLC-40,1,3669.0,F9 FT B1040.2,FT
11,12,CCAFS SLC-40,1,6460.0,F9 B5 B1046.2,B5
";

pub fn sample_dataset() -> LaunchDataset {
    load_reader(SAMPLE_CSV.as_bytes()).expect("fixture CSV parses")
}
